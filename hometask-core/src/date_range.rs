//! Inclusive calendar-date ranges for event saves.

use chrono::{Duration, NaiveDate};

use crate::error::{HomeTaskError, HomeTaskResult};

/// An inclusive range of calendar dates. A single-day save is a range whose
/// start and end are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range; an absent end means a single date.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> HomeTaskResult<Self> {
        let end = end.unwrap_or(start);
        if end < start {
            return Err(HomeTaskError::InvertedRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        DateRange { start: date, end: date }
    }

    /// Parse `YYYY-MM-DD` argument strings into a range.
    pub fn from_args(start: &str, end: Option<&str>) -> HomeTaskResult<Self> {
        let start = parse_date(start)?;
        let end = end.map(parse_date).transpose()?;
        DateRange::new(start, end)
    }

    /// Day-by-day walk from start to end, inclusive.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut day = self.start;
        while day <= self.end {
            dates.push(day);
            day += Duration::days(1);
        }
        dates
    }

    pub fn is_multi_day(&self) -> bool {
        self.start != self.end
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> HomeTaskResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| HomeTaskError::InvalidDate(s.to_string()))
}
