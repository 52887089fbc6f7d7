use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Dataset, IndicatorKind, IndicatorSeries, Timeframe, ViewWindow};
use crate::error::{ChartError, ChartResult};

/// Stable pane index inside a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(usize);

impl PaneId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

/// How candles are drawn in a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartStyle {
    #[default]
    Candlestick,
    Line,
    Bar,
}

impl ChartStyle {
    pub const ALL: [Self; 3] = [Self::Candlestick, Self::Line, Self::Bar];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Candlestick => "Candlestick",
            Self::Line => "Line",
            Self::Bar => "Bar",
        }
    }
}

impl FromStr for ChartStyle {
    type Err = ChartError;

    fn from_str(s: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart style `{s}`")))
    }
}

/// Full state of one pane.
///
/// Panes are patched in place and never destroyed; panes beyond the current
/// split keep their state for instant re-show.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneState {
    pub id: PaneId,
    pub pair: String,
    pub timeframe: Timeframe,
    pub chart_style: ChartStyle,
    pub indicator: IndicatorKind,
    /// Dataset as ingested, kept so timeframe switches resample from source.
    pub raw_dataset: Option<Dataset>,
    pub dataset: Dataset,
    pub indicator_series: Option<IndicatorSeries>,
    pub window: ViewWindow,
    pub playing: bool,
    pub speed: f64,
    /// Bar count reported to the host; dataset length once data is loaded.
    pub bars: usize,
}

impl PaneState {
    #[must_use]
    pub fn new(id: PaneId, pair: impl Into<String>, timeframe: Timeframe, view_bars: usize) -> Self {
        Self {
            id,
            pair: pair.into(),
            timeframe,
            chart_style: ChartStyle::default(),
            indicator: IndicatorKind::default(),
            raw_dataset: None,
            dataset: Dataset::default(),
            indicator_series: None,
            window: ViewWindow::empty(view_bars),
            playing: false,
            speed: 1.0,
            bars: view_bars,
        }
    }

    #[must_use]
    pub fn total_bars(&self) -> usize {
        self.window.total_bars()
    }

    #[must_use]
    pub fn view_bars(&self) -> usize {
        self.window.view_bars()
    }

    #[must_use]
    pub fn view_offset(&self) -> usize {
        self.window.view_offset()
    }

    #[must_use]
    pub fn seek(&self) -> usize {
        self.window.seek()
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }

    /// Replaces the dataset wholesale and resets the window to its start.
    pub fn replace_dataset(
        &mut self,
        dataset: Dataset,
        indicators: Option<IndicatorSeries>,
        default_view_bars: usize,
        min_bars_cap: usize,
    ) {
        let total = dataset.len();
        self.dataset = dataset;
        self.indicator_series = indicators;
        self.window = ViewWindow::for_dataset(total, default_view_bars, min_bars_cap);
        self.bars = total;
        if total == 0 {
            self.playing = false;
        }
    }
}
