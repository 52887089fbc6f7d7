use crate::render::Color;

/// Colors and metrics used by the pane render pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background_color: Color,
    pub placeholder_text_color: Color,
    pub placeholder_text: &'static str,
    pub placeholder_font_size_px: f64,
    /// Placeholder anchor, in logical pixels from the top-left corner.
    pub placeholder_origin: (f64, f64),
    /// Gap between the surface edge and the chart box on every side.
    pub chart_inset_px: f64,
    pub bullish_color: Color,
    pub bearish_color: Color,
    pub line_color: Color,
    pub bar_color: Color,
    pub indicator_color: Color,
    pub crosshair_color: Color,
    /// Share of a bar slot taken by candle bodies and bar strokes.
    pub body_width_ratio: f64,
    pub min_body_width_px: f64,
    pub min_bar_width_px: f64,
    pub min_body_height_px: f64,
    pub wick_width_px: f64,
    pub bar_stroke_width_px: f64,
    pub line_stroke_width_px: f64,
    pub indicator_stroke_width_px: f64,
    pub crosshair_stroke_width_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb8(0x0d, 0x10, 0x16),
            placeholder_text_color: Color::rgb8(0x6b, 0x76, 0x86),
            placeholder_text: "No data",
            placeholder_font_size_px: 12.0,
            placeholder_origin: (12.0, 20.0),
            chart_inset_px: 12.0,
            bullish_color: Color::rgb8(0x5a, 0xd1, 0xff),
            bearish_color: Color::rgb8(0xff, 0x6b, 0x6b),
            line_color: Color::rgb8(0x5a, 0xd1, 0xff),
            bar_color: Color::rgb8(0xff, 0xd1, 0x66),
            indicator_color: Color::rgb8(0xff, 0xbe, 0x5a),
            crosshair_color: Color::rgb8(0xff, 0xff, 0xff).with_alpha(0.2),
            body_width_ratio: 0.6,
            min_body_width_px: 2.0,
            min_bar_width_px: 1.0,
            min_body_height_px: 2.0,
            wick_width_px: 1.0,
            bar_stroke_width_px: 1.0,
            line_stroke_width_px: 1.4,
            indicator_stroke_width_px: 1.2,
            crosshair_stroke_width_px: 1.0,
        }
    }
}
