//! Calendar dates stored as ISO-8601 text (`YYYY-MM-DD`).

use crate::error::{Error, Result, TypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar date without time-of-day or timezone.
///
/// DATE columns hold their value as ISO-8601 text; this type is the parsed
/// form. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    /// Create a date, validating the month and day ranges.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        if month < 1 || month > 12 {
            return Err(Error::Type(TypeError {
                expected: "month in 1..=12",
                actual: month.to_string(),
                column: None,
            }));
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(Error::Type(TypeError {
                expected: "valid day of month",
                actual: format!("{:04}-{:02}-{:02}", year, month, day),
                column: None,
            }));
        }
        Ok(Self { year, month, day })
    }

    /// Parse strict `YYYY-MM-DD` text.
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = || {
            Error::Type(TypeError {
                expected: "DATE text in YYYY-MM-DD form",
                actual: text.to_string(),
                column: None,
            })
        };

        let bytes = text.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }

        let year: i32 = text[0..4].parse().map_err(|_| malformed())?;
        let month: u8 = text[5..7].parse().map_err(|_| malformed())?;
        let day: u8 = text[8..10].parse().map_err(|_| malformed())?;

        Self::new(year, month, day)
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let date = Date::parse("2014-09-18").unwrap();
        assert_eq!(date.year(), 2014);
        assert_eq!(date.month(), 9);
        assert_eq!(date.day(), 18);
        assert_eq!(date.to_string(), "2014-09-18");
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert!(Date::parse("").is_err());
        assert!(Date::parse("2014-9-18").is_err());
        assert!(Date::parse("2014/09/18").is_err());
        assert!(Date::parse("not a date").is_err());
        assert!(Date::parse("2014-09-18T00:00").is_err());
    }

    #[test]
    fn parse_rejects_out_of_range_fields() {
        assert!(Date::parse("2014-13-01").is_err());
        assert!(Date::parse("2014-00-01").is_err());
        assert!(Date::parse("2014-02-30").is_err());
        assert!(Date::parse("2014-04-31").is_err());
    }

    #[test]
    fn leap_year_handling() {
        assert!(Date::parse("2016-02-29").is_ok());
        assert!(Date::parse("2015-02-29").is_err());
        assert!(Date::parse("1900-02-29").is_err());
        assert!(Date::parse("2000-02-29").is_ok());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = Date::parse("2013-12-31").unwrap();
        let b = Date::parse("2014-01-01").unwrap();
        assert!(a < b);
        assert_eq!(a, Date::new(2013, 12, 31).unwrap());
    }
}
