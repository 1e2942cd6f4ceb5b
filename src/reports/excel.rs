//! Excel report generation.

use crate::Result;
use crate::tally::{TallyTable, weekday_label};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;

/// Generate an Excel workbook for the tally to a writer: one worksheet, one
/// row per weekday, one column per identity.
///
/// # Errors
///
/// Returns an error if the Excel file cannot be created or written
pub fn generate<W: Write>(table: &TallyTable, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let identities: Vec<_> = table.identities().into_iter().collect();

    let bold = Format::new().set_bold();
    for (col, identity) in identities.iter().enumerate() {
        let _ = worksheet.write_string_with_format(0, u16::try_from(col + 1)?, identity, &bold)?;
    }

    for (row, (weekday, cells)) in table.rows().enumerate() {
        let r = u32::try_from(row + 1)?;
        let _ = worksheet.write_string_with_format(r, 0, weekday_label(weekday), &bold)?;

        #[expect(clippy::cast_precision_loss, reason = "commit counts fit in f64")]
        for (col, identity) in identities.iter().enumerate() {
            let count = cells.get(identity).copied().unwrap_or(0);
            let _ = worksheet.write_number(r, u16::try_from(col + 1)?, count as f64)?;
        }
    }

    let buffer = workbook.save_to_buffer()?;
    writer.write_all(&buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn produces_a_non_empty_workbook() {
        let mut table = TallyTable::new();
        table.add(Weekday::Mon, "ada", 3);
        table.add(Weekday::Tue, "bob", 1);

        let mut buffer = Vec::new();
        generate(&table, &mut buffer).unwrap();

        // xlsx files are zip archives
        assert_eq!(&buffer[..2], b"PK");
    }
}
