use chrono::{Datelike, Days, FixedOffset, NaiveDate, Weekday};
use core::fmt::{Display, Formatter};

/// A single calendar day plus the fixed UTC-offset start/end timestamp pair
/// used to scope one history query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    weekday: Weekday,
    date: NaiveDate,
    offset: FixedOffset,
}

impl DayWindow {
    /// The window for the most recent occurrence of `weekday` relative to
    /// `today` (today itself when the weekday matches).
    #[must_use]
    pub fn most_recent(weekday: Weekday, today: NaiveDate, offset: FixedOffset) -> Self {
        let days_back = today.weekday().days_since(weekday);
        Self {
            weekday,
            date: today - Days::new(u64::from(days_back)),
            offset,
        }
    }

    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Start of the day, as a GraphQL `GitTimestamp`.
    #[must_use]
    pub fn since(&self) -> String {
        format!("{}T00:00:00{}", self.date, self.offset)
    }

    /// End of the day, as a GraphQL `GitTimestamp`.
    #[must_use]
    pub fn until(&self) -> String {
        format!("{}T23:59:59{}", self.date, self.offset)
    }

    /// The row label for this window's weekday.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        weekday_label(self.weekday)
    }
}

impl Display for DayWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.label(), self.date)
    }
}

/// Full English name of a weekday, used as the tally row label.
#[must_use]
pub const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset() -> FixedOffset {
        "-03:00".parse().unwrap()
    }

    #[test]
    fn most_recent_is_today_when_weekday_matches() {
        // 2018-03-26 was a Monday
        let today = NaiveDate::from_ymd_opt(2018, 3, 26).unwrap();
        let window = DayWindow::most_recent(Weekday::Mon, today, offset());
        assert_eq!(window.date(), today);
    }

    #[test]
    fn most_recent_goes_backwards_never_forwards() {
        let today = NaiveDate::from_ymd_opt(2018, 3, 26).unwrap(); // Monday
        let window = DayWindow::most_recent(Weekday::Tue, today, offset());
        assert_eq!(window.date(), NaiveDate::from_ymd_opt(2018, 3, 20).unwrap());
        assert_eq!(window.date().weekday(), Weekday::Tue);

        let window = DayWindow::most_recent(Weekday::Sun, today, offset());
        assert_eq!(window.date(), NaiveDate::from_ymd_opt(2018, 3, 25).unwrap());
    }

    #[test]
    fn window_bounds_carry_the_offset() {
        let today = NaiveDate::from_ymd_opt(2018, 3, 26).unwrap();
        let window = DayWindow::most_recent(Weekday::Mon, today, offset());
        assert_eq!(window.since(), "2018-03-26T00:00:00-03:00");
        assert_eq!(window.until(), "2018-03-26T23:59:59-03:00");
    }

    #[test]
    fn labels_are_full_names() {
        assert_eq!(weekday_label(Weekday::Mon), "Monday");
        assert_eq!(weekday_label(Weekday::Sun), "Sunday");
    }
}
