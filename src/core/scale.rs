use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Candle;
use crate::error::{ChartError, ChartResult};

/// Relative padding applied above and below an auto-scaled range.
pub const AUTOSCALE_PADDING_RATIO: f64 = 0.05;

/// Inclusive numeric range observed over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Min/max over the finite samples; `None` when there is none.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut finite = values
            .into_iter()
            .filter(|value| value.is_finite())
            .map(OrderedFloat);
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        Some(Self {
            min: min.into_inner(),
            max: max.into_inner(),
        })
    }

    /// Price range spanned by candle lows and highs.
    #[must_use]
    pub fn of_candles(candles: &[Candle]) -> Option<Self> {
        let lows = Self::from_values(candles.iter().map(|candle| candle.low))?;
        let highs = Self::from_values(candles.iter().map(|candle| candle.high))?;
        Some(Self {
            min: lows.min,
            max: highs.max,
        })
    }

    /// Nullable samples, skipping `None` and NaN.
    #[must_use]
    pub fn of_samples(samples: &[Option<f64>]) -> Option<Self> {
        Self::from_values(samples.iter().flatten().copied())
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Expands both ends by `ratio * span`, or by one absolute unit when the
    /// range is degenerate.
    #[must_use]
    pub fn padded(self, ratio: f64) -> Self {
        let padding = self.span() * ratio;
        let padding = if padding.is_finite() && padding != 0.0 {
            padding
        } else {
            1.0
        };
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }
}

/// Vertical value-to-pixel mapping over a chart box (Y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    range: ValueRange,
    start_y: f64,
    chart_height: f64,
}

impl ValueScale {
    pub fn new(range: ValueRange, start_y: f64, chart_height: f64) -> ChartResult<Self> {
        if !range.min.is_finite() || !range.max.is_finite() || range.span() <= 0.0 {
            return Err(ChartError::InvalidData(
                "value range must be finite with max > min".to_owned(),
            ));
        }
        if !start_y.is_finite() || !chart_height.is_finite() {
            return Err(ChartError::InvalidData(
                "chart box must be finite".to_owned(),
            ));
        }
        Ok(Self {
            range,
            start_y,
            chart_height,
        })
    }

    /// Scale over `range` after standard auto-scale padding.
    pub fn autoscaled(range: ValueRange, start_y: f64, chart_height: f64) -> ChartResult<Self> {
        Self::new(range.padded(AUTOSCALE_PADDING_RATIO), start_y, chart_height)
    }

    #[must_use]
    pub fn range(self) -> ValueRange {
        self.range
    }

    /// `start_y + (max - value) * (chart_height / (max - min))`.
    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        self.start_y + (self.range.max - value) * (self.chart_height / self.range.span())
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        if self.chart_height == 0.0 {
            return self.range.max;
        }
        self.range.max - (pixel - self.start_y) * (self.range.span() / self.chart_height)
    }
}
