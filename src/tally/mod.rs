//! The tally core: day windows, commit cleaning, co-author crediting, and
//! the weekday × identity count tables.

mod clean;
mod coauthor;
mod table;
mod window;

pub use clean::{CleanedHistory, clean_commits};
pub use coauthor::{extract_credits, merge_credits};
pub use table::TallyTable;
pub use window::{DayWindow, weekday_label};
