use serde::{Deserialize, Serialize};

use crate::core::{LayoutSize, Viewport};
use crate::error::{ChartError, ChartResult};

/// Device-pixel-ratio scaled drawing surface for one pane.
///
/// Primitives are expressed in logical pixels; backends scale by `dpr`
/// when painting into the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    layout_width: u32,
    layout_height: u32,
    dpr: f64,
}

impl SurfaceSpec {
    /// Floors the layout box to whole pixels (at least one) and records `dpr`.
    ///
    /// A non-finite or non-positive `dpr` falls back to 1.
    #[must_use]
    pub fn from_layout(layout: LayoutSize, dpr: f64) -> Self {
        let (layout_width, layout_height) = layout.floored();
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            layout_width,
            layout_height,
            dpr,
        }
    }

    #[must_use]
    pub const fn layout_width(self) -> u32 {
        self.layout_width
    }

    #[must_use]
    pub const fn layout_height(self) -> u32 {
        self.layout_height
    }

    #[must_use]
    pub const fn dpr(self) -> f64 {
        self.dpr
    }

    /// Backing-store size: `floor(layout) * dpr` per axis.
    #[must_use]
    pub fn backing(self) -> Viewport {
        Viewport::new(
            scale_dimension(self.layout_width, self.dpr),
            scale_dimension(self.layout_height, self.dpr),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        let backing = self.backing();
        if !backing.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: backing.width,
                height: backing.height,
            });
        }
        Ok(())
    }
}

fn scale_dimension(logical: u32, dpr: f64) -> u32 {
    let scaled = (f64::from(logical) * dpr).floor();
    scaled.clamp(1.0, f64::from(u32::MAX)) as u32
}
