use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Backing-store size of a drawing surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pane layout box in logical (CSS-like) pixels, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSize {
    pub width: f64,
    pub height: f64,
}

impl LayoutSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whole logical pixels, never below one.
    #[must_use]
    pub fn floored(self) -> (u32, u32) {
        (floor_dimension(self.width), floor_dimension(self.height))
    }
}

/// Number of panes shown side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum SplitLayout {
    Single,
    #[default]
    Double,
    Quad,
}

impl SplitLayout {
    pub const ALL: [Self; 3] = [Self::Single, Self::Double, Self::Quad];

    #[must_use]
    pub const fn pane_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Quad => 4,
        }
    }

    /// Layout for a split count of 1, 2 or 4.
    #[must_use]
    pub fn from_count(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|split| split.pane_count() == count)
    }
}

impl TryFrom<u8> for SplitLayout {
    type Error = ChartError;

    fn try_from(value: u8) -> ChartResult<Self> {
        Self::from_count(usize::from(value))
            .ok_or_else(|| ChartError::InvalidData(format!("split must be 1, 2 or 4, got {value}")))
    }
}

impl From<SplitLayout> for u8 {
    fn from(split: SplitLayout) -> Self {
        split.pane_count() as u8
    }
}

fn floor_dimension(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.floor().min(f64::from(u32::MAX)) as u32
}
