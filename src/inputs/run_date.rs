use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Validate a run date: ISO 8601 as required by the BAM specification.
///
/// Accepts a date (`2019-07-10`, `20190710`) or a date-time with a zone
/// designator (`2019-07-10T21:09:25+00:00`, `...Z`, `...+0000`,
/// `20190710T210925Z`).
pub fn is_valid_run_date(date: &str) -> bool {
    if DateTime::parse_from_rfc3339(date).is_ok() {
        return true;
    }
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];
    if DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(date, fmt).is_ok())
    {
        return true;
    }
    // basic (separator-free) date-times and numeric offsets without a colon
    const DATETIME_OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y%m%dT%H%M%S%z"];
    if DATETIME_OFFSET_FORMATS
        .iter()
        .any(|fmt| DateTime::parse_from_str(date, fmt).is_ok())
    {
        return true;
    }
    const DATETIME_UTC_FORMATS: &[&str] = &["%Y%m%dT%H%M%SZ", "%Y-%m-%dT%H:%M:%SZ"];
    DATETIME_UTC_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(date, fmt).is_ok())
}

/// Validate a batch of run dates, reporting every invalid value at once.
pub fn validate_run_dates(dates: &[String]) -> Result<()> {
    let invalid: Vec<String> = dates
        .iter()
        .filter(|date| !is_valid_run_date(date))
        .cloned()
        .collect();

    if !invalid.is_empty() {
        return Err(Error::InvalidRunDates(invalid));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_dates() {
        assert!(is_valid_run_date("2019-07-10"));
        assert!(is_valid_run_date("2019-07-10T21:09:25+00:00"));
        assert!(is_valid_run_date("2019-07-10T21:09:25Z"));
        assert!(is_valid_run_date("20190710T210925Z"));
        assert!(is_valid_run_date("2019-07-10T21:09:25+0000"));
        assert!(is_valid_run_date("20190710"));
    }

    #[test]
    fn invalid_dates() {
        assert!(!is_valid_run_date("2019-13-01"));
        assert!(!is_valid_run_date("2019-02-30"));
        assert!(!is_valid_run_date("10/07/2019"));
        assert!(!is_valid_run_date("yesterday"));
        assert!(!is_valid_run_date(""));
    }

    #[test]
    fn all_invalid_values_are_reported() {
        let dates = vec![
            "2019-07-10".to_string(),
            "2019-13-01".to_string(),
            "nope".to_string(),
        ];
        match validate_run_dates(&dates) {
            Err(Error::InvalidRunDates(values)) => {
                assert_eq!(values, ["2019-13-01", "nope"]);
            }
            other => panic!("expected InvalidRunDates, got {other:?}"),
        }
    }
}
