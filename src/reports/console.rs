//! Console summary of a tally.

use crate::Result;
use crate::tally::{TallyTable, weekday_label};
use core::fmt::Write;
use owo_colors::OwoColorize;

const LABEL_WIDTH: usize = 9; // "Wednesday"
const COLUMN_GAP: usize = 2;

/// Render the tally as an aligned text table with a per-identity totals row.
pub fn generate<W: Write>(table: &TallyTable, use_color: bool, writer: &mut W) -> Result<()> {
    if table.is_empty() {
        writeln!(writer, "Nothing tallied.")?;
        return Ok(());
    }

    let identities: Vec<_> = table.identities().into_iter().collect();
    let widths: Vec<_> = identities.iter().map(|identity| identity.len().max(LABEL_WIDTH - 2)).collect();

    write!(writer, "{:<LABEL_WIDTH$}", "")?;
    for (identity, width) in identities.iter().zip(&widths) {
        let gap = COLUMN_GAP + width - identity.len();
        if use_color {
            write!(writer, "{:gap$}{}", "", identity.bold())?;
        } else {
            write!(writer, "{:gap$}{identity}", "")?;
        }
    }
    writeln!(writer)?;

    let mut totals = vec![0u64; identities.len()];

    for (weekday, cells) in table.rows() {
        write_label(writer, weekday_label(weekday), use_color)?;

        for (index, (identity, width)) in identities.iter().zip(&widths).enumerate() {
            let count = cells.get(identity).copied().unwrap_or(0);
            totals[index] += count;
            write!(writer, "{:>width$}", count, width = COLUMN_GAP + width)?;
        }
        writeln!(writer)?;
    }

    write_label(writer, "Total", use_color)?;
    for (total, width) in totals.iter().zip(&widths) {
        write!(writer, "{:>width$}", total, width = COLUMN_GAP + width)?;
    }
    writeln!(writer)?;

    Ok(())
}

/// Write a left-aligned row label, padding outside the ANSI styling so bold
/// escapes don't throw off the column widths.
fn write_label<W: Write>(writer: &mut W, label: &str, use_color: bool) -> Result<()> {
    if use_color {
        write!(writer, "{}", label.bold())?;
    } else {
        write!(writer, "{label}")?;
    }
    write!(writer, "{:pad$}", "", pad = LABEL_WIDTH.saturating_sub(label.len()))?;
    Ok(())
}
