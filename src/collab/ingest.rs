//! CSV/TSV candle ingestion.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64, parse_utc_timestamp};
use crate::core::{Candle, Dataset};
use crate::error::{ChartError, ChartResult};

/// Result of one ingestion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResult {
    pub dataset: Dataset,
    pub used_cache: bool,
}

/// Loads a dataset from a path.
pub trait Ingestor {
    fn ingest(&mut self, path: &str) -> ChartResult<IngestResult>;
}

/// Reads delimited text files from disk. Never caches.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvIngestor;

impl Ingestor for CsvIngestor {
    fn ingest(&mut self, path: &str) -> ChartResult<IngestResult> {
        let content = fs::read_to_string(Path::new(path))
            .map_err(|err| ChartError::Collaborator(format!("failed to read `{path}`: {err}")))?;
        let dataset = parse_delimited(path, &content)?;
        debug!(path, rows = dataset.len(), "dataset parsed");
        Ok(IngestResult {
            dataset,
            used_cache: false,
        })
    }
}

/// Parses delimited candle rows.
///
/// Each line picks its own delimiter: tab, else comma, else whitespace.
/// A first line mentioning `timestamp`, or both `date` and `time`, is a
/// header. The timestamp is one column, or a dotted date and a clock time in
/// two columns when at least six columns are present. Volume is optional.
pub fn parse_delimited(source_path: &str, content: &str) -> ChartResult<Dataset> {
    let mut candles = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if index == 0 && is_header(line) {
            continue;
        }
        let candle = parse_row(line).map_err(|err| at_line(err, index + 1))?;
        candles.push(candle);
    }
    Ok(Dataset::new(source_path, candles))
}

fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("timestamp") || (lower.contains("date") && lower.contains("time"))
}

fn parse_row(line: &str) -> ChartResult<Candle> {
    let columns = split_columns(line);
    if columns.len() < 5 {
        return Err(ChartError::InvalidData("invalid column count".to_owned()));
    }
    let split_timestamp =
        columns.len() >= 6 && looks_like_date(columns[0]) && looks_like_clock(columns[1]);
    let (raw_time, first_value) = if split_timestamp {
        (format!("{} {}", columns[0].trim(), columns[1].trim()), 2)
    } else {
        (columns[0].trim().to_owned(), 1)
    };
    if columns.len() < first_value + 4 {
        return Err(ChartError::InvalidData("invalid column count".to_owned()));
    }

    let time = parse_utc_timestamp(&raw_time)?;
    let value = |offset: usize| parse_number(columns[first_value + offset]);
    let candle = Candle::from_raw(
        datetime_to_unix_seconds(time),
        decimal_to_f64(value(0)?, "open")?,
        decimal_to_f64(value(1)?, "high")?,
        decimal_to_f64(value(2)?, "low")?,
        decimal_to_f64(value(3)?, "close")?,
    )?;
    match columns.get(first_value + 4) {
        Some(raw) => candle.with_volume(decimal_to_f64(parse_number(raw)?, "volume")?),
        None => Ok(candle),
    }
}

fn split_columns(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.split('\t').collect()
    } else if line.contains(',') {
        line.split(',').collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn all_digit_parts(raw: &str, separator: char, parts: usize) -> bool {
    let pieces: Vec<&str> = raw.trim().split(separator).collect();
    pieces.len() >= parts
        && pieces[..parts]
            .iter()
            .all(|piece| !piece.is_empty() && piece.chars().all(|c| c.is_ascii_digit()))
}

fn looks_like_date(raw: &str) -> bool {
    all_digit_parts(raw, '.', 3)
}

fn looks_like_clock(raw: &str) -> bool {
    all_digit_parts(raw, ':', 3)
}

/// Decimal text with thousands separators removed.
fn parse_number(raw: &str) -> ChartResult<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| ChartError::InvalidData(format!("invalid number: {}", raw.trim())))
}

fn at_line(err: ChartError, line: usize) -> ChartError {
    let message = match err {
        ChartError::InvalidData(message) | ChartError::Collaborator(message) => message,
        other => other.to_string(),
    };
    ChartError::InvalidData(format!("{message} at line {line}"))
}

#[cfg(test)]
mod tests {
    use super::parse_delimited;

    #[test]
    fn split_date_and_time_columns() {
        let dataset = parse_delimited(
            "eurusd.csv",
            "2003.05.05,0:01:00,1.1,1.2,1.0,1.15,10\n2003.05.05,0:02:00,1.15,1.25,1.1,1.2,5",
        )
        .expect("dataset");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.candles[1].time - dataset.candles[0].time, 60.0);
        assert_eq!(dataset.candles[0].volume, 10.0);
    }

    #[test]
    fn volume_defaults_to_zero() {
        let dataset =
            parse_delimited("a.tsv", "2024-01-02 03:04:05\t1\t2\t0.5\t1.5").expect("dataset");
        assert_eq!(dataset.candles[0].volume, 0.0);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse_delimited("a.csv", "timestamp,o,h,l,c\n2024-01-02 03:04:05,1,2")
            .expect_err("short row");
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn comma_takes_precedence_over_whitespace() {
        let dataset = parse_delimited("a.txt", "2024.01.02 03:04:05 1,000.5 1,001 999 1,000");
        assert!(dataset.is_err());
    }

    #[test]
    fn tab_rows_strip_thousands_separators() {
        let dataset = parse_delimited("a.tsv", "2024.01.02\t03:04:05\t1,000\t1,002\t999\t1,001")
            .expect("dataset");
        assert_eq!(dataset.candles[0].high, 1002.0);
    }
}
