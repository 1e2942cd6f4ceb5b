//! Tab-separated values export.

use crate::Result;
use crate::tally::{TallyTable, weekday_label};
use std::io::Write;

/// Write the tally as UTF-8 tab-separated values: one row per weekday label,
/// one column per identity, cell = commit count.
pub fn generate<W: Write>(table: &TallyTable, writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let identities: Vec<_> = table.identities().into_iter().collect();

    let mut header = Vec::with_capacity(identities.len() + 1);
    header.push(String::new());
    header.extend(identities.iter().cloned());
    out.write_record(&header)?;

    for (weekday, cells) in table.rows() {
        let mut record = Vec::with_capacity(identities.len() + 1);
        record.push(weekday_label(weekday).to_owned());
        for identity in &identities {
            record.push(cells.get(identity).copied().unwrap_or(0).to_string());
        }
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn writes_weekday_rows_and_identity_columns() {
        let mut table = TallyTable::new();
        table.add(Weekday::Mon, "ada", 3);
        table.add(Weekday::Mon, "bob", 1);
        table.add(Weekday::Wed, "ada", 2);

        let mut buffer = Vec::new();
        generate(&table, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["\tada\tbob", "Monday\t3\t1", "Wednesday\t2\t0"]);
    }

    #[test]
    fn empty_table_writes_only_an_empty_header() {
        let mut buffer = Vec::new();
        generate(&TallyTable::new(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "\"\"\n");
    }
}
