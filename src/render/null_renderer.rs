use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer used by tests and hosts without a drawing backend.
///
/// It validates frame content and records what the last frame contained.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_backing: Option<Viewport>,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_polyline_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_backing = Some(frame.surface.backing());
        self.last_line_count = frame.line_count();
        self.last_rect_count = frame.rect_count();
        self.last_polyline_count = frame.polyline_count();
        self.last_text_count = frame.text_count();
        Ok(())
    }
}
