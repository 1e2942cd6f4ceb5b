//! Tally exports: TSV file, Excel workbook, console summary.

mod console;
mod excel;
mod tsv;

pub use console::generate as generate_console;
pub use excel::generate as generate_xlsx;
pub use tsv::generate as generate_tsv;
