//! Header clock text.

use chrono::{NaiveDate, NaiveDateTime};

/// `Weekday, Month D, YYYY H:MM AM`.
pub const CLOCK_FORMAT: &str = "%A, %B %-d, %Y %-I:%M %p";

/// Local calendar fields as `Date` reports them (month 0 is January).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl ClockFields {
    /// `None` for fields that name no real date or time.
    pub fn to_datetime(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day)?
            .and_hms_opt(self.hours, self.minutes, 0)
    }
}

pub fn format_clock(at: NaiveDateTime) -> String {
    at.format(CLOCK_FORMAT).to_string()
}
