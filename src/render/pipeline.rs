//! Pane render pipeline.
//!
//! A pure function of `(candle window, indicator samples, chart style,
//! window state, surface, crosshair)` to a layered [`RenderFrame`]. Nothing
//! here touches a backend; the frame is handed to a [`Renderer`] afterwards.

use crate::core::{
    Candle, ChartStyle, IndicatorKind, IndicatorSeries, PaneId, ValueRange, ValueScale,
    ViewWindow,
};
use crate::error::ChartResult;
use crate::render::projection::{SlotLayout, project_candles};
use crate::render::{
    CanvasLayerKind, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, RenderStyle,
    Renderer, SurfaceSpec, TextHAlign, TextPrimitive,
};
use crate::telemetry::RenderTimer;

/// Everything needed to draw one pane.
#[derive(Debug, Clone, Copy)]
pub struct PaneRenderInput<'a> {
    pub pane: PaneId,
    pub candles: &'a [Candle],
    pub indicator: Option<&'a IndicatorSeries>,
    pub indicator_kind: IndicatorKind,
    pub chart_style: ChartStyle,
    pub window: ViewWindow,
    pub surface: SurfaceSpec,
    /// Hovered pointer position in logical pixels.
    pub crosshair: Option<(f64, f64)>,
}

/// Inner chart box in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBox {
    pub start_x: f64,
    pub start_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartBox {
    #[must_use]
    pub fn inset(surface: SurfaceSpec, inset: f64) -> Self {
        Self {
            start_x: inset,
            start_y: inset,
            width: (f64::from(surface.layout_width()) - inset * 2.0).max(0.0),
            height: (f64::from(surface.layout_height()) - inset * 2.0).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderPipeline {
    style: RenderStyle,
}

impl RenderPipeline {
    #[must_use]
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Builds the frame and paints it with `renderer`.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        input: &PaneRenderInput<'_>,
        renderer: &mut R,
    ) -> ChartResult<RenderFrame> {
        let timer = RenderTimer::start(input.pane.index());
        let frame = self.build_frame(input)?;
        renderer.render(&frame)?;
        timer.finish();
        Ok(frame)
    }

    pub fn build_frame(&self, input: &PaneRenderInput<'_>) -> ChartResult<RenderFrame> {
        let style = &self.style;
        let mut frame = RenderFrame::new(input.surface, style.background_color);

        if input.candles.is_empty() {
            let (x, y) = style.placeholder_origin;
            frame.push_text(
                CanvasLayerKind::Placeholder,
                TextPrimitive::new(
                    style.placeholder_text,
                    x,
                    y,
                    style.placeholder_font_size_px,
                    style.placeholder_text_color,
                    TextHAlign::Left,
                ),
            );
            return Ok(frame);
        }

        // The window may lag behind a freshly swapped dataset; clamp to what
        // is actually here.
        let window = input.window.with_total_bars(input.candles.len());
        let range = window.render_range();
        let visible = &input.candles[range.clone()];
        let chart = ChartBox::inset(input.surface, style.chart_inset_px);
        let slots = SlotLayout::new(chart.start_x, chart.width, visible.len());

        if let Some(prices) = ValueRange::of_candles(visible) {
            let scale = ValueScale::autoscaled(prices, chart.start_y, chart.height)?;
            let pass = SeriesPass {
                candles: visible,
                slots,
                scale,
                style,
            };
            paint_series(input.chart_style, &pass, &mut frame);
        }

        if let Some(samples) = input
            .indicator
            .and_then(|series| series.resolve(input.indicator_kind))
        {
            let start = range.start.min(samples.len());
            let end = range.end.min(samples.len());
            paint_indicator(&samples[start..end], slots, chart, style, &mut frame);
        }

        if let Some((x, y)) = input.crosshair {
            paint_crosshair(x, y, chart, style, &mut frame);
        }

        Ok(frame)
    }
}

struct SeriesPass<'a> {
    candles: &'a [Candle],
    slots: SlotLayout,
    scale: ValueScale,
    style: &'a RenderStyle,
}

fn paint_series(chart_style: ChartStyle, pass: &SeriesPass<'_>, frame: &mut RenderFrame) {
    match chart_style {
        ChartStyle::Candlestick => paint_candlesticks(pass, frame),
        ChartStyle::Line => paint_close_line(pass, frame),
        ChartStyle::Bar => paint_bars(pass, frame),
    }
}

fn paint_candlesticks(pass: &SeriesPass<'_>, frame: &mut RenderFrame) {
    let style = pass.style;
    let body_width = (pass.slots.slot_width * style.body_width_ratio).max(style.min_body_width_px);
    for candle in project_candles(pass.candles, pass.slots, pass.scale, body_width) {
        let color = if candle.is_bullish {
            style.bullish_color
        } else {
            style.bearish_color
        };
        frame.push_line(
            CanvasLayerKind::Series,
            LinePrimitive::new(
                candle.center_x,
                candle.high_y,
                candle.center_x,
                candle.low_y,
                style.wick_width_px,
                color,
            ),
        );
        frame.push_rect(
            CanvasLayerKind::Series,
            RectPrimitive::new(
                candle.body_left,
                candle.body_top(),
                candle.body_width,
                candle.body_height(style.min_body_height_px),
                color,
            ),
        );
    }
}

fn paint_bars(pass: &SeriesPass<'_>, frame: &mut RenderFrame) {
    let style = pass.style;
    let bar_width = (pass.slots.slot_width * style.body_width_ratio).max(style.min_bar_width_px);
    for bar in project_candles(pass.candles, pass.slots, pass.scale, bar_width) {
        frame.push_line(
            CanvasLayerKind::Series,
            LinePrimitive::new(
                bar.center_x,
                bar.high_y,
                bar.center_x,
                bar.low_y,
                style.bar_stroke_width_px,
                style.bar_color,
            ),
        );
    }
}

fn paint_close_line(pass: &SeriesPass<'_>, frame: &mut RenderFrame) {
    let style = pass.style;
    let mut line = PolylinePrimitive::new(style.line_stroke_width_px, style.line_color);
    for (index, candle) in pass.candles.iter().enumerate() {
        line.line_to(pass.slots.center_x(index), pass.scale.value_to_pixel(candle.close));
    }
    frame.push_polyline(CanvasLayerKind::Series, line);
}

/// Draws `samples` on their own auto-scaled range, breaking the path at every
/// missing or NaN sample.
fn paint_indicator(
    samples: &[Option<f64>],
    slots: SlotLayout,
    chart: ChartBox,
    style: &RenderStyle,
    frame: &mut RenderFrame,
) {
    let Some(range) = ValueRange::of_samples(samples) else {
        return;
    };
    let Ok(scale) = ValueScale::autoscaled(range, chart.start_y, chart.height) else {
        return;
    };

    let mut line = PolylinePrimitive::new(style.indicator_stroke_width_px, style.indicator_color);
    let mut pen_down = false;
    for (index, sample) in samples.iter().enumerate() {
        match sample.filter(|value| value.is_finite()) {
            Some(value) => {
                let point = (slots.center_x(index), scale.value_to_pixel(value));
                if pen_down {
                    line.line_to(point.0, point.1);
                } else {
                    line.move_to(point.0, point.1);
                    pen_down = true;
                }
            }
            None => pen_down = false,
        }
    }
    frame.push_polyline(CanvasLayerKind::Indicator, line);
}

fn paint_crosshair(x: f64, y: f64, chart: ChartBox, style: &RenderStyle, frame: &mut RenderFrame) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    let width = style.crosshair_stroke_width_px;
    let color = style.crosshair_color;
    frame.push_line(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(x, chart.start_y, x, chart.start_y + chart.height, width, color),
    );
    frame.push_line(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(chart.start_x, y, chart.start_x + chart.width, y, width, color),
    );
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{ChartBox, PaneRenderInput, RenderPipeline};
    use crate::core::{
        Candle, ChartStyle, IndicatorKind, IndicatorSeries, LayoutSize, PaneId, ViewWindow,
    };
    use crate::render::{CanvasLayerKind, SurfaceSpec};

    fn candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64;
                Candle::new(i as f64 * 60.0, base, base + 2.0, base - 2.0, base + 1.0)
                    .expect("candle")
            })
            .collect()
    }

    fn input<'a>(candles: &'a [Candle], style: ChartStyle) -> PaneRenderInput<'a> {
        PaneRenderInput {
            pane: PaneId::new(0),
            candles,
            indicator: None,
            indicator_kind: IndicatorKind::Ma,
            chart_style: style,
            window: ViewWindow::for_dataset(candles.len(), 240, 20),
            surface: SurfaceSpec::from_layout(LayoutSize::new(624.0, 324.0), 2.0),
            crosshair: None,
        }
    }

    #[test]
    fn chart_box_is_inset_on_every_side() {
        let surface = SurfaceSpec::from_layout(LayoutSize::new(624.0, 324.0), 1.0);
        let chart = ChartBox::inset(surface, 12.0);
        assert_relative_eq!(chart.width, 600.0);
        assert_relative_eq!(chart.height, 300.0);
    }

    #[test]
    fn bar_style_draws_strokes_only() {
        let data = candles(30);
        let frame = RenderPipeline::default()
            .build_frame(&input(&data, ChartStyle::Bar))
            .expect("frame");
        assert_eq!(frame.line_count(), 30);
        assert_eq!(frame.rect_count(), 0);
    }

    #[test]
    fn indicator_shorter_than_window_is_truncated() {
        let data = candles(30);
        let series = IndicatorSeries::Flat(vec![Some(1.0); 10]);
        let mut request = input(&data, ChartStyle::Line);
        request.indicator = Some(&series);
        let frame = RenderPipeline::default().build_frame(&request).expect("frame");
        let layer = frame.layer(CanvasLayerKind::Indicator).expect("layer");
        assert_eq!(layer.polylines[0].point_count(), 10);
    }
}
