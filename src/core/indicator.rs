use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Indicator selected for a pane's overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    #[default]
    Ma,
    Rsi,
    Macd,
}

impl IndicatorKind {
    pub const ALL: [Self; 3] = [Self::Ma, Self::Rsi, Self::Macd];

    /// Lookup key inside a name-keyed [`IndicatorSeries`].
    #[must_use]
    pub const fn series_key(self) -> &'static str {
        match self {
            Self::Ma => "ma",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ma => "MA",
            Self::Rsi => "RSI",
            Self::Macd => "MACD",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IndicatorKind {
    type Err = ChartError;

    fn from_str(s: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.series_key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown indicator `{s}`")))
    }
}

/// Nullable samples aligned 1:1 with a dataset's candles.
pub type IndicatorValues = Vec<Option<f64>>;

/// Externally produced indicator data, treated as opaque aligned samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorSeries {
    Flat(IndicatorValues),
    Named(IndexMap<String, IndicatorValues>),
}

impl IndicatorSeries {
    const FALLBACK_KEY: &'static str = "ma";

    /// Resolves the samples to draw for `kind`.
    ///
    /// Flat data is returned as-is. Named data is looked up by the
    /// case-insensitive indicator key, falling back to `ma`.
    #[must_use]
    pub fn resolve(&self, kind: IndicatorKind) -> Option<&[Option<f64>]> {
        match self {
            Self::Flat(values) => Some(values.as_slice()),
            Self::Named(map) => find_ignore_case(map, kind.series_key())
                .or_else(|| find_ignore_case(map, Self::FALLBACK_KEY))
                .map(Vec::as_slice),
        }
    }

    /// Length of the longest contained sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(values) => values.len(),
            Self::Named(map) => map.values().map(Vec::len).max().unwrap_or(0),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn find_ignore_case<'a>(
    map: &'a IndexMap<String, IndicatorValues>,
    key: &str,
) -> Option<&'a IndicatorValues> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, values)| values)
    })
}
