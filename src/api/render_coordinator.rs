use crate::core::{LayoutSize, PaneId, PaneState};
use crate::error::ChartResult;
use crate::interaction::InputController;
use crate::render::{PaneRenderInput, RenderFrame, Renderer, SurfaceSpec};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::ChartWorkspace;

impl<R: Renderer> ChartWorkspace<R> {
    /// Records the pane's CSS-pixel size and device pixel ratio.
    ///
    /// The crosshair clamps to this size and the next render sizes its
    /// backing store from it.
    pub fn set_pane_layout(&mut self, pane: PaneId, layout: LayoutSize, dpr: f64) -> ChartResult<()> {
        let index = self.checked_index(pane)?;
        self.surfaces[index] = SurfaceSpec::from_layout(layout, dpr);
        self.input.set_layout(pane, layout);
        Ok(())
    }

    #[must_use]
    pub fn pane_surface(&self, pane: PaneId) -> Option<SurfaceSpec> {
        self.surfaces.get(pane.index()).copied()
    }

    /// Draws one pane with the workspace renderer.
    pub fn render_pane(&mut self, pane: PaneId) -> ChartResult<RenderFrame> {
        let index = self.checked_index(pane)?;
        let input = render_input(&self.panes[index], self.surfaces[index], &self.input);
        self.pipeline.render(&input, &mut self.renderer)
    }

    /// Draws every visible pane in index order.
    pub fn render_visible(&mut self) -> ChartResult<Vec<RenderFrame>> {
        (0..self.visible_count())
            .map(|index| self.render_pane(PaneId::new(index)))
            .collect()
    }

    /// Draws one pane straight into a host-owned Cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_pane_on_cairo_context(
        &mut self,
        pane: PaneId,
        context: &cairo::Context,
    ) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let index = self.checked_index(pane)?;
        let input = render_input(&self.panes[index], self.surfaces[index], &self.input);
        let frame = self.pipeline.build_frame(&input)?;
        self.renderer.render_on_cairo_context(context, &frame)
    }
}

fn render_input<'a>(
    pane: &'a PaneState,
    surface: SurfaceSpec,
    input: &InputController,
) -> PaneRenderInput<'a> {
    PaneRenderInput {
        pane: pane.id,
        candles: &pane.dataset.candles,
        indicator: pane.indicator_series.as_ref(),
        indicator_kind: pane.indicator,
        chart_style: pane.chart_style,
        window: pane.window,
        surface,
        crosshair: input.crosshair(pane.id),
    }
}
