use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MIN_VIEW_BARS, DEFAULT_VIEW_BARS, SplitLayout, Timeframe};
use crate::error::{ChartError, ChartResult};

/// Workspace bootstrap configuration.
///
/// Serializable so hosts can persist their setup; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_pane_count")]
    pub pane_count: usize,
    #[serde(default)]
    pub initial_split: SplitLayout,
    #[serde(default = "default_view_bars")]
    pub default_view_bars: usize,
    /// Upper cap of the minimum visible bar count.
    #[serde(default = "default_min_view_bars")]
    pub min_view_bars: usize,
    #[serde(default = "default_base_playback_ms")]
    pub base_playback_ms: u64,
    #[serde(default = "default_min_playback_interval_ms")]
    pub min_playback_interval_ms: u64,
    #[serde(default = "default_wheel_step_bars")]
    pub wheel_step_bars: usize,
    #[serde(default = "default_drag_px_per_bar")]
    pub drag_px_per_bar: f64,
    /// Dataset length at which a performance advisory is raised.
    #[serde(default = "default_large_dataset_bars")]
    pub large_dataset_bars: usize,
    #[serde(default = "default_speed_options")]
    pub speed_options: Vec<f64>,
    #[serde(default = "default_pair")]
    pub default_pair: String,
    #[serde(default)]
    pub default_timeframe: Timeframe,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            pane_count: default_pane_count(),
            initial_split: SplitLayout::default(),
            default_view_bars: default_view_bars(),
            min_view_bars: default_min_view_bars(),
            base_playback_ms: default_base_playback_ms(),
            min_playback_interval_ms: default_min_playback_interval_ms(),
            wheel_step_bars: default_wheel_step_bars(),
            drag_px_per_bar: default_drag_px_per_bar(),
            large_dataset_bars: default_large_dataset_bars(),
            speed_options: default_speed_options(),
            default_pair: default_pair(),
            default_timeframe: Timeframe::default(),
        }
    }
}

impl WorkspaceConfig {
    #[must_use]
    pub fn with_initial_split(mut self, split: SplitLayout) -> Self {
        self.initial_split = split;
        self
    }

    #[must_use]
    pub fn with_default_view_bars(mut self, bars: usize) -> Self {
        self.default_view_bars = bars;
        self
    }

    #[must_use]
    pub fn with_min_view_bars(mut self, bars: usize) -> Self {
        self.min_view_bars = bars;
        self
    }

    /// Sets the base interval and its floor, both in milliseconds.
    #[must_use]
    pub fn with_playback_timing(mut self, base_ms: u64, min_interval_ms: u64) -> Self {
        self.base_playback_ms = base_ms;
        self.min_playback_interval_ms = min_interval_ms;
        self
    }

    #[must_use]
    pub fn with_wheel_step_bars(mut self, bars: usize) -> Self {
        self.wheel_step_bars = bars;
        self
    }

    #[must_use]
    pub fn with_drag_px_per_bar(mut self, px: f64) -> Self {
        self.drag_px_per_bar = px;
        self
    }

    #[must_use]
    pub fn with_large_dataset_bars(mut self, bars: usize) -> Self {
        self.large_dataset_bars = bars;
        self
    }

    #[must_use]
    pub fn with_speed_options(mut self, speeds: Vec<f64>) -> Self {
        self.speed_options = speeds;
        self
    }

    #[must_use]
    pub fn with_default_pair(mut self, pair: impl Into<String>) -> Self {
        self.default_pair = pair.into();
        self
    }

    #[must_use]
    pub fn with_default_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.default_timeframe = timeframe;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.pane_count < self.initial_split.pane_count()
            || self.pane_count < SplitLayout::Quad.pane_count()
        {
            return Err(ChartError::InvalidData(format!(
                "pane_count must be >= 4, got {}",
                self.pane_count
            )));
        }
        if self.default_view_bars == 0 || self.min_view_bars == 0 {
            return Err(ChartError::InvalidData(
                "view bar defaults must be > 0".to_owned(),
            ));
        }
        if self.base_playback_ms == 0 || self.min_playback_interval_ms == 0 {
            return Err(ChartError::InvalidData(
                "playback intervals must be > 0".to_owned(),
            ));
        }
        if self.wheel_step_bars == 0 {
            return Err(ChartError::InvalidData(
                "wheel_step_bars must be > 0".to_owned(),
            ));
        }
        if !self.drag_px_per_bar.is_finite() || self.drag_px_per_bar <= 0.0 {
            return Err(ChartError::InvalidData(
                "drag_px_per_bar must be finite and > 0".to_owned(),
            ));
        }
        if self.large_dataset_bars == 0 {
            return Err(ChartError::InvalidData(
                "large_dataset_bars must be > 0".to_owned(),
            ));
        }
        if self.speed_options.is_empty()
            || self
                .speed_options
                .iter()
                .any(|speed| !speed.is_finite() || *speed <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "speed_options must be non-empty, finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_pane_count() -> usize {
    4
}

fn default_view_bars() -> usize {
    DEFAULT_VIEW_BARS
}

fn default_min_view_bars() -> usize {
    DEFAULT_MIN_VIEW_BARS
}

fn default_base_playback_ms() -> u64 {
    500
}

fn default_min_playback_interval_ms() -> u64 {
    50
}

fn default_wheel_step_bars() -> usize {
    10
}

fn default_drag_px_per_bar() -> f64 {
    6.0
}

fn default_large_dataset_bars() -> usize {
    100_000
}

fn default_speed_options() -> Vec<f64> {
    vec![0.5, 1.0, 2.0, 5.0, 10.0]
}

fn default_pair() -> String {
    "default".to_owned()
}
