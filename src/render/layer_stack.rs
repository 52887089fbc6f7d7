use serde::{Deserialize, Serialize};

/// Draw layers of one pane, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Series,
    Indicator,
    Crosshair,
    Placeholder,
}

impl CanvasLayerKind {
    /// Canonical paint order; later layers draw over earlier ones.
    pub const PAINT_ORDER: [Self; 4] = [
        Self::Series,
        Self::Indicator,
        Self::Crosshair,
        Self::Placeholder,
    ];
}
