use crate::tally::weekday_label;
use chrono::Weekday;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Row index in Monday-first order, so iteration yields weekday order.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Mapping from weekday → identity → commit count.
///
/// Two parallel tables exist during a collection run, one for direct-author
/// counts keyed by login and one for co-author credits keyed by email; they
/// are summed cell-wise after email → login normalization. Missing entries
/// read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyTable {
    rows: BTreeMap<u32, BTreeMap<String, u64>>,
}

impl TallyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` commits for `identity` on `weekday`.
    ///
    /// A zero count still materializes the cell so the identity shows up as
    /// a column in the export.
    pub fn add(&mut self, weekday: Weekday, identity: impl Into<String>, count: u64) {
        *self
            .rows
            .entry(weekday.num_days_from_monday())
            .or_default()
            .entry(identity.into())
            .or_insert(0) += count;
    }

    /// The count for one cell, zero when absent.
    #[must_use]
    pub fn count(&self, weekday: Weekday, identity: &str) -> u64 {
        self.rows
            .get(&weekday.num_days_from_monday())
            .and_then(|row| row.get(identity))
            .copied()
            .unwrap_or(0)
    }

    /// Rename identities according to `map`, summing counts when a rename
    /// collides with an existing column. Identities absent from the map are
    /// carried through unchanged.
    pub fn map_identities(&mut self, map: &HashMap<String, String>) {
        for row in self.rows.values_mut() {
            let cells = core::mem::take(row);
            for (identity, count) in cells {
                let identity = map.get(&identity).cloned().unwrap_or(identity);
                *row.entry(identity).or_insert(0) += count;
            }
        }
    }

    /// Cell-wise sum of two tables, aligning rows and columns and treating
    /// missing entries as zero.
    #[must_use]
    pub fn sum(mut self, other: Self) -> Self {
        for (day, cells) in other.rows {
            let row = self.rows.entry(day).or_default();
            for (identity, count) in cells {
                *row.entry(identity).or_insert(0) += count;
            }
        }
        self
    }

    /// All identities appearing in any row, sorted.
    #[must_use]
    pub fn identities(&self) -> BTreeSet<String> {
        self.rows.values().flat_map(|row| row.keys().cloned()).collect()
    }

    /// Rows in weekday order (Monday first).
    pub fn rows(&self) -> impl Iterator<Item = (Weekday, &BTreeMap<String, u64>)> {
        self.rows.iter().map(|(&day, cells)| (WEEKDAYS[day as usize % 7], cells))
    }

    /// Row labels in weekday order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.rows().map(|(weekday, _)| weekday_label(weekday))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
