//! Date ranges and timesheet periods.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// Date format used by both the command line and the Tempo API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
///
/// Chrono accepts unpadded fields such as `2024-1-5`; those are rejected here
/// so the string can be forwarded verbatim.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

/// A single timesheet period as reported by Tempo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Period {
    /// First day of the period (`YYYY-MM-DD`).
    pub from: String,

    /// Last day of the period (`YYYY-MM-DD`).
    pub to: String,
}

impl Period {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether both bounds are strict dates and `from <= to`.
    pub fn is_valid(&self) -> bool {
        match (parse_date(&self.from), parse_date(&self.to)) {
            (Some(from), Some(to)) => from <= to,
            _ => false,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// The overall date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Create a range, returning `None` when `to` precedes `from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    /// Start date in query parameter form.
    pub fn from_param(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    /// End date in query parameter form.
    pub fn to_param(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_is_strict() {
        assert!(parse_date("2024-01-05").is_some());
        assert!(parse_date("2024-1-5").is_none());
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("05.01.2024").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_period_validity() {
        assert!(Period::new("2024-01-01", "2024-01-15").is_valid());
        assert!(Period::new("2024-01-01", "2024-01-01").is_valid());
        assert!(!Period::new("2024-01-16", "2024-01-15").is_valid());
        assert!(!Period::new("2024-01-01", "soon").is_valid());
    }

    #[test]
    fn test_period_ignores_unknown_fields() {
        let period: Period =
            serde_json::from_str(r#"{"from": "2024-01-01", "to": "2024-01-15", "extra": 1}"#)
                .unwrap();
        assert_eq!(period, Period::new("2024-01-01", "2024-01-15"));
    }

    #[test]
    fn test_date_range_rejects_reversed_bounds() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let range = DateRange::new(jan, feb).unwrap();
        assert_eq!(range.from_param(), "2024-01-01");
        assert_eq!(range.to_param(), "2024-02-01");
        assert!(DateRange::new(feb, jan).is_none());
    }
}
