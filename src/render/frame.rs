use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, Color, LinePrimitive, PolylinePrimitive, RectPrimitive, SurfaceSpec,
    TextPrimitive,
};

/// Primitives of one canvas layer.
///
/// Backends paint lines, then rects, then polylines, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            polylines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.polylines.is_empty()
            && self.texts.is_empty()
    }

    fn validate(&self) -> ChartResult<()> {
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one pane draw pass.
///
/// Coordinates are logical pixels; the surface carries the device pixel
/// ratio backends apply to the backing store.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: SurfaceSpec,
    pub background: Color,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: SurfaceSpec, background: Color) -> Self {
        Self {
            surface,
            background,
            layers: CanvasLayerKind::PAINT_ORDER
                .into_iter()
                .map(LayerPrimitives::new)
                .collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> &mut LayerPrimitives {
        let index = match self.layers.iter().position(|layer| layer.kind == kind) {
            Some(index) => index,
            None => {
                self.layers.push(LayerPrimitives::new(kind));
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_polyline(&mut self, kind: CanvasLayerKind, polyline: PolylinePrimitive) {
        if !polyline.is_empty() {
            self.layer_mut(kind).polylines.push(polyline);
        }
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.surface.validate()?;
        self.background.validate()?;
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.lines.len()).sum()
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rects.len()).sum()
    }

    #[must_use]
    pub fn polyline_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.polylines.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.texts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::LayoutSize;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive, PolylinePrimitive, SurfaceSpec};

    fn frame() -> RenderFrame {
        RenderFrame::new(
            SurfaceSpec::from_layout(LayoutSize::new(100.0, 50.0), 1.0),
            Color::rgb(0.0, 0.0, 0.0),
        )
    }

    #[test]
    fn new_frame_has_canonical_empty_layers() {
        let frame = frame();
        assert!(frame.is_empty());
        assert_eq!(frame.layers.len(), CanvasLayerKind::PAINT_ORDER.len());
    }

    #[test]
    fn empty_polylines_are_dropped() {
        let mut frame = frame();
        frame.push_polyline(
            CanvasLayerKind::Indicator,
            PolylinePrimitive::new(1.0, Color::rgb(1.0, 1.0, 1.0)),
        );
        assert_eq!(frame.polyline_count(), 0);
    }

    #[test]
    fn validate_rejects_nan_geometry() {
        let mut frame = frame();
        frame.push_line(
            CanvasLayerKind::Series,
            LinePrimitive::new(f64::NAN, 0.0, 1.0, 1.0, 1.0, Color::rgb(1.0, 1.0, 1.0)),
        );
        assert!(frame.validate().is_err());
    }
}
