use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{Candle, ValueScale};

/// Horizontal slot layout of a rendered window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotLayout {
    pub start_x: f64,
    pub slot_width: f64,
}

impl SlotLayout {
    /// `chart_width / bars` wide slots starting at `start_x`.
    #[must_use]
    pub fn new(start_x: f64, chart_width: f64, bars: usize) -> Self {
        let bars = bars.max(1) as f64;
        Self {
            start_x,
            slot_width: chart_width / bars,
        }
    }

    #[must_use]
    pub fn slot_left(self, index: usize) -> f64 {
        self.start_x + self.slot_width * index as f64
    }

    #[must_use]
    pub fn center_x(self, index: usize) -> f64 {
        self.slot_left(index) + self.slot_width / 2.0
    }
}

/// Projected candle geometry in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_left: f64,
    pub body_width: f64,
    pub open_y: f64,
    pub close_y: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub is_bullish: bool,
}

impl CandleGeometry {
    #[must_use]
    pub fn body_top(self) -> f64 {
        self.open_y.min(self.close_y)
    }

    #[must_use]
    pub fn body_height(self, min_height: f64) -> f64 {
        (self.open_y - self.close_y).abs().max(min_height)
    }
}

/// Projects a candle window into per-slot geometry with a centered body of
/// `body_width` pixels.
#[must_use]
pub fn project_candles(
    candles: &[Candle],
    slots: SlotLayout,
    scale: ValueScale,
    body_width: f64,
) -> Vec<CandleGeometry> {
    let project = |(index, candle): (usize, &Candle)| {
        let body_left = slots.slot_left(index) + (slots.slot_width - body_width) / 2.0;
        CandleGeometry {
            center_x: body_left + body_width / 2.0,
            body_left,
            body_width,
            open_y: scale.value_to_pixel(candle.open),
            close_y: scale.value_to_pixel(candle.close),
            high_y: scale.value_to_pixel(candle.high),
            low_y: scale.value_to_pixel(candle.low),
            is_bullish: candle.is_bullish(),
        }
    };

    #[cfg(feature = "parallel-projection")]
    {
        candles.par_iter().enumerate().map(project).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        candles.iter().enumerate().map(project).collect()
    }
}
