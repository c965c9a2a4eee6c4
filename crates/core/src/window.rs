// Date windows for ranged tools
//
// Upstream dates come as `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`; only the date
// portion takes part in window checks.

use chrono::{Days, NaiveDate};

/// Default lookback for indicator series
pub const INDICATOR_LOOKBACK_DAYS: u64 = 100;

/// Default lookahead for the earnings calendar
pub const CALENDAR_LOOKAHEAD_DAYS: u64 = 30;

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Window ending at `to` (default `today`) and starting `days` before it
    /// unless `from` is given
    pub fn lookback(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
        days: u64,
    ) -> Self {
        let to = to.unwrap_or(today);
        let from = from.unwrap_or_else(|| to.checked_sub_days(Days::new(days)).unwrap_or(to));
        Self { from, to }
    }

    /// Window starting at `from` (default `today`) and ending `days` after
    /// today unless `to` is given
    pub fn lookahead(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
        days: u64,
    ) -> Self {
        let from = from.unwrap_or(today);
        let to = to.unwrap_or_else(|| today.checked_add_days(Days::new(days)).unwrap_or(today));
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Check an upstream date string; unparsable dates are outside every window
    pub fn contains_str(&self, raw: &str) -> bool {
        parse_upstream_date(raw).is_some_and(|date| self.contains(date))
    }

    pub fn from_param(&self) -> String {
        self.from.format(crate::validation::DATE_FORMAT).to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format(crate::validation::DATE_FORMAT).to_string()
    }
}

pub fn parse_upstream_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, crate::validation::DATE_FORMAT).ok()
}
