use approx::assert_relative_eq;
use fxchart::core::{
    Candle, ChartStyle, IndicatorKind, IndicatorSeries, LayoutSize, PaneId, ValueRange, ValueScale,
    ViewWindow,
};
use fxchart::render::{
    CanvasLayerKind, NullRenderer, PaneRenderInput, RenderPipeline, RenderStyle, SurfaceSpec,
};
use indexmap::IndexMap;

fn candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|index| {
            let base = 100.0 + (index % 9) as f64;
            let close = if index % 2 == 0 { base + 1.0 } else { base - 1.0 };
            Candle::new(index as f64 * 60.0, base, base + 2.0, base - 2.0, close)
                .expect("valid candle")
        })
        .collect()
}

fn surface() -> SurfaceSpec {
    SurfaceSpec::from_layout(LayoutSize::new(800.0, 400.0), 1.0)
}

fn input<'a>(
    candles: &'a [Candle],
    style: ChartStyle,
    indicator: Option<&'a IndicatorSeries>,
) -> PaneRenderInput<'a> {
    PaneRenderInput {
        pane: PaneId::new(0),
        candles,
        indicator,
        indicator_kind: IndicatorKind::Ma,
        chart_style: style,
        window: ViewWindow::for_dataset(candles.len(), 240, 20),
        surface: surface(),
        crosshair: None,
    }
}

#[test]
fn empty_dataset_draws_only_placeholder() {
    let pipeline = RenderPipeline::default();
    let frame = pipeline
        .build_frame(&input(&[], ChartStyle::Candlestick, None))
        .expect("frame");

    let placeholder = frame
        .layer(CanvasLayerKind::Placeholder)
        .expect("placeholder layer");
    assert_eq!(placeholder.texts.len(), 1);
    assert_eq!(placeholder.texts[0].text, "No data");
    assert_eq!(frame.text_count(), 1);
    assert_eq!(frame.line_count() + frame.rect_count() + frame.polyline_count(), 0);
}

#[test]
fn candlesticks_draw_wick_and_body_per_visible_bar() {
    let data = candles(1_000);
    let frame = RenderPipeline::default()
        .build_frame(&input(&data, ChartStyle::Candlestick, None))
        .expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.lines.len(), 240);
    assert_eq!(series.rects.len(), 240);
}

#[test]
fn candle_colors_follow_direction() {
    let data = candles(40);
    let style = RenderStyle::default();
    let frame = RenderPipeline::new(style)
        .build_frame(&input(&data, ChartStyle::Candlestick, None))
        .expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.rects[0].fill_color, style.bullish_color);
    assert_eq!(series.rects[1].fill_color, style.bearish_color);
}

#[test]
fn line_style_draws_one_close_polyline() {
    let data = candles(300);
    let frame = RenderPipeline::default()
        .build_frame(&input(&data, ChartStyle::Line, None))
        .expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.polylines.len(), 1);
    assert_eq!(series.polylines[0].subpaths.len(), 1);
    assert_eq!(series.polylines[0].point_count(), 240);
    assert!(series.rects.is_empty());
}

#[test]
fn bar_style_draws_high_low_strokes_only() {
    let data = candles(100);
    let frame = RenderPipeline::default()
        .build_frame(&input(&data, ChartStyle::Bar, None))
        .expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.lines.len(), 100);
    assert!(series.rects.is_empty());
    assert!(series.polylines.is_empty());
}

#[test]
fn missing_indicator_sample_splits_polyline() {
    let data = candles(300);
    let mut samples: Vec<Option<f64>> = (0..300).map(|index| Some(index as f64)).collect();
    samples[150] = None;
    let indicator = IndicatorSeries::Flat(samples);

    let frame = RenderPipeline::default()
        .build_frame(&input(&data, ChartStyle::Candlestick, Some(&indicator)))
        .expect("frame");
    let layer = frame.layer(CanvasLayerKind::Indicator).expect("indicator layer");
    assert_eq!(layer.polylines.len(), 1);
    let lengths: Vec<usize> = layer.polylines[0].subpaths.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![150, 89]);
}

#[test]
fn nan_samples_break_the_line_too() {
    let data = candles(50);
    let mut samples: Vec<Option<f64>> = (0..50).map(|index| Some(index as f64)).collect();
    samples[10] = Some(f64::NAN);
    samples[11] = None;
    let indicator = IndicatorSeries::Flat(samples);

    let frame = RenderPipeline::default()
        .build_frame(&input(&data, ChartStyle::Line, Some(&indicator)))
        .expect("frame");
    let layer = frame.layer(CanvasLayerKind::Indicator).expect("indicator layer");
    let lengths: Vec<usize> = layer.polylines[0].subpaths.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![10, 38]);
}

#[test]
fn named_indicator_resolves_case_insensitively() {
    let data = candles(60);
    let mut named = IndexMap::new();
    named.insert("RSI".to_owned(), vec![Some(50.0); 60]);
    named.insert("ma".to_owned(), vec![Some(101.0); 60]);
    let indicator = IndicatorSeries::Named(named);

    let mut render_input = input(&data, ChartStyle::Candlestick, Some(&indicator));
    render_input.indicator_kind = IndicatorKind::Rsi;
    let frame = RenderPipeline::default()
        .build_frame(&render_input)
        .expect("frame");
    let layer = frame.layer(CanvasLayerKind::Indicator).expect("indicator layer");
    assert_eq!(layer.polylines[0].point_count(), 60);
}

#[test]
fn crosshair_draws_guides_above_data() {
    let data = candles(60);
    let mut render_input = input(&data, ChartStyle::Candlestick, None);
    render_input.crosshair = Some((200.0, 150.0));
    let style = RenderStyle::default();
    let frame = RenderPipeline::new(style)
        .build_frame(&render_input)
        .expect("frame");

    let crosshair = frame.layer(CanvasLayerKind::Crosshair).expect("crosshair layer");
    assert_eq!(crosshair.lines.len(), 2);
    let vertical = crosshair.lines[0];
    assert_relative_eq!(vertical.x1, 200.0);
    assert_relative_eq!(vertical.x2, 200.0);
    assert_eq!(vertical.color, style.crosshair_color);
}

#[test]
fn price_mapping_is_inverted_and_padded() {
    let range = ValueRange { min: 90.0, max: 110.0 };
    let scale = ValueScale::autoscaled(range, 12.0, 376.0).expect("scale");
    let padded = scale.range();
    assert_relative_eq!(padded.min, 89.0);
    assert_relative_eq!(padded.max, 111.0);
    assert_relative_eq!(scale.value_to_pixel(111.0), 12.0);
    assert_relative_eq!(scale.value_to_pixel(89.0), 388.0);
    assert!(scale.value_to_pixel(100.0) < scale.value_to_pixel(95.0));
}

#[test]
fn flat_price_range_pads_by_one_unit() {
    let range = ValueRange { min: 5.0, max: 5.0 };
    let scale = ValueScale::autoscaled(range, 0.0, 100.0).expect("scale");
    assert_relative_eq!(scale.range().min, 4.0);
    assert_relative_eq!(scale.range().max, 6.0);
}

#[test]
fn renderer_receives_dpr_scaled_backing() {
    let data = candles(30);
    let mut render_input = input(&data, ChartStyle::Candlestick, None);
    render_input.surface = SurfaceSpec::from_layout(LayoutSize::new(640.7, 360.2), 2.0);

    let mut renderer = NullRenderer::default();
    let frame = RenderPipeline::default()
        .render(&render_input, &mut renderer)
        .expect("render");
    let backing = renderer.last_backing.expect("backing recorded");
    assert_eq!((backing.width, backing.height), (1_280, 720));
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, frame.rect_count());
}

#[test]
fn frames_are_deterministic() {
    let data = candles(500);
    let pipeline = RenderPipeline::default();
    let first = pipeline
        .build_frame(&input(&data, ChartStyle::Candlestick, None))
        .expect("frame");
    let second = pipeline
        .build_frame(&input(&data, ChartStyle::Candlestick, None))
        .expect("frame");
    assert_eq!(first, second);
}
