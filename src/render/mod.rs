mod frame;
mod layer_stack;
mod null_renderer;
mod pipeline;
mod primitives;
mod projection;
mod style;
mod surface;

pub use frame::{LayerPrimitives, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use pipeline::{ChartBox, PaneRenderInput, RenderPipeline};
pub use primitives::{
    Color, LinePrimitive, PolylinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use projection::{CandleGeometry, SlotLayout, project_candles};
pub use style::RenderStyle;
pub use surface::SurfaceSpec;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from pane state and input handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
