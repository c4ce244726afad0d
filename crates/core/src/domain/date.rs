// Calendar helpers for epoch-millisecond dates
//
// Every date column is stored as epoch milliseconds and bucketed by year in
// UTC on the read side, so dates must be constructed in UTC on the write side.

use super::error::{DomainError, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Epoch milliseconds for midnight UTC of the given calendar day
pub fn utc_millis(year: i32, month: u32, day: u32) -> Result<i64> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DomainError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DomainError::InvalidDate(date.to_string()))?;
    Ok(midnight.and_utc().timestamp_millis())
}

/// Last millisecond of the given calendar day (UTC), for inclusive range ends
pub fn utc_end_of_day_millis(year: i32, month: u32, day: u32) -> Result<i64> {
    Ok(utc_millis(year, month, day)? + MILLIS_PER_DAY - 1)
}

/// Calendar year (UTC) of an epoch-millisecond timestamp
pub fn utc_year(millis: i64) -> Result<i32> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.year())
        .ok_or_else(|| DomainError::InvalidDate(millis.to_string()))
}

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// First instant the store accepts as an expense date (0000-01-01T00:00:00Z)
pub const MIN_STORABLE_MILLIS: i64 = -62_167_219_200_000;

/// Last instant the store accepts as an expense date (9999-12-31T23:59:59.999Z)
pub const MAX_STORABLE_MILLIS: i64 = 253_402_300_799_999;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_boundaries_are_utc() {
        let new_year = utc_millis(2024, 1, 1).unwrap();
        assert_eq!(utc_year(new_year).unwrap(), 2024);
        assert_eq!(utc_year(new_year - 1).unwrap(), 2023);

        let eve = utc_end_of_day_millis(2023, 12, 31).unwrap();
        assert_eq!(eve, new_year - 1);
    }

    #[test]
    fn test_storable_range_covers_four_digit_years() {
        assert_eq!(utc_millis(0, 1, 1).unwrap(), MIN_STORABLE_MILLIS);
        assert_eq!(
            utc_end_of_day_millis(9999, 12, 31).unwrap(),
            MAX_STORABLE_MILLIS
        );
        assert_eq!(utc_year(-1).unwrap(), 1969);
    }

    #[test]
    fn test_invalid_calendar_day() {
        let err = utc_millis(2023, 2, 30).unwrap_err();
        assert_eq!(err, DomainError::InvalidDate("2023-02-30".to_string()));
    }
}
