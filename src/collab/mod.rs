//! External collaborator contracts and their reference implementations.
//!
//! The workspace only consumes the data shapes; hosts may plug in their own
//! ingestion, resampling, indicator or preset backends.

mod history;
mod indicators;
mod ingest;
mod presets;
mod resample;

pub use history::{CacheStatus, DatasetHistory, HistoryEntry, MAX_HISTORY_ENTRIES};
pub use indicators::{
    IndicatorEngine, IndicatorPeriods, MacdSeries, StandardIndicators, ema, macd, rsi, sma,
};
pub use ingest::{CsvIngestor, IngestResult, Ingestor, parse_delimited};
pub use presets::{InMemoryPresetStore, PresetStore};
pub use resample::{Resampler, TimeBucketResampler};
