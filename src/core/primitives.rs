use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Parses `YYYY.MM.DD H:MM:SS`, `YYYY-MM-DD HH:MM:SS` or RFC 3339 text as UTC.
pub fn parse_utc_timestamp(raw: &str) -> ChartResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let (date, time) = raw
        .split_once([' ', '\t', 'T'])
        .ok_or_else(|| ChartError::InvalidData("invalid timestamp format".to_owned()))?;
    let date = NaiveDate::parse_from_str(&date.replace('.', "-"), "%Y-%m-%d")
        .map_err(|_| ChartError::InvalidData("invalid date format".to_owned()))?;
    let time = NaiveTime::parse_from_str(time.trim().trim_end_matches('Z'), "%H:%M:%S")
        .map_err(|_| ChartError::InvalidData("invalid time format".to_owned()))?;
    Ok(NaiveDateTime::new(date, time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::parse_utc_timestamp;

    #[test]
    fn parses_dotted_date_with_single_digit_hour() {
        let time = parse_utc_timestamp("2003.05.05 0:01:00").expect("timestamp");
        assert_eq!(time.to_rfc3339(), "2003-05-05T00:01:00+00:00");
    }

    #[test]
    fn parses_rfc3339() {
        let time = parse_utc_timestamp("2024-01-02T03:04:05Z").expect("timestamp");
        assert_eq!(time.timestamp(), 1_704_164_645);
    }

    #[test]
    fn rejects_out_of_range_time() {
        assert!(parse_utc_timestamp("2003.05.05 24:00:00").is_err());
        assert!(parse_utc_timestamp("garbage").is_err());
    }
}
