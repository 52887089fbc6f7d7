use std::time::Duration;

use fxchart::api::{ChartWorkspace, WorkspaceConfig, WorkspaceEvent};
use fxchart::collab::{
    DatasetHistory, IngestResult, Ingestor, StandardIndicators, TimeBucketResampler,
};
use fxchart::core::{Candle, Dataset, LayoutSize, PaneId, SplitLayout, Timeframe};
use fxchart::error::{ChartError, ChartResult};
use fxchart::interaction::{InputEvent, Key};
use fxchart::render::NullRenderer;

fn candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|index| {
            let base = 1.0 + (index % 13) as f64 * 0.001;
            Candle::new(index as f64 * 60.0, base, base + 0.002, base - 0.002, base + 0.001)
                .expect("valid candle")
        })
        .collect()
}

fn ingest(count: usize) -> IngestResult {
    IngestResult {
        dataset: Dataset::new(format!("fixture-{count}.csv"), candles(count)),
        used_cache: false,
    }
}

fn workspace() -> ChartWorkspace<NullRenderer> {
    ChartWorkspace::new(NullRenderer::default(), WorkspaceConfig::default()).expect("workspace")
}

fn workspace_with(count: usize) -> ChartWorkspace<NullRenderer> {
    let mut workspace = workspace();
    workspace.apply_ingest(ingest(count), None);
    workspace
}

fn window_of(workspace: &ChartWorkspace<NullRenderer>, pane: usize) -> (usize, usize, usize) {
    let pane = &workspace.panes()[pane];
    (pane.view_bars(), pane.view_offset(), pane.seek())
}

struct FixtureIngestor {
    bars: usize,
    fail_with: Option<&'static str>,
}

impl Ingestor for FixtureIngestor {
    fn ingest(&mut self, path: &str) -> ChartResult<IngestResult> {
        if let Some(message) = self.fail_with {
            return Err(ChartError::Collaborator(message.to_owned()));
        }
        Ok(IngestResult {
            dataset: Dataset::new(path, candles(self.bars)),
            used_cache: true,
        })
    }
}

#[test]
fn new_workspace_uses_defaults() {
    let workspace = workspace();
    assert_eq!(workspace.panes().len(), 4);
    assert_eq!(workspace.split(), SplitLayout::Double);
    assert_eq!(workspace.visible_panes().len(), 2);
    assert_eq!(workspace.active_pane_id(), PaneId::new(0));
    assert!(!workspace.sync_enabled());

    let pane = workspace.active_pane();
    assert_eq!(pane.pair, "default");
    assert_eq!(pane.timeframe, Timeframe::M1);
    assert_eq!(pane.view_bars(), 240);
    assert_eq!(pane.bars, 240);
    assert!(!pane.has_data());
}

#[test]
fn too_few_panes_are_rejected() {
    let config: WorkspaceConfig = serde_json::from_str(r#"{"pane_count": 2}"#).expect("config");
    let err = ChartWorkspace::new(NullRenderer::default(), config)
        .err()
        .expect("invalid pane count");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn ingest_resets_active_pane_window() {
    let mut workspace = workspace();
    workspace.pan_to(PaneId::new(0), 50).expect("pan");
    workspace.apply_ingest(ingest(1_000), None);

    let pane = workspace.active_pane();
    assert_eq!(pane.bars, 1_000);
    assert_eq!(window_of(&workspace, 0), (240, 0, 0));
    assert!(pane.raw_dataset.is_some());
    let info = workspace.last_ingest().expect("ingest info");
    assert_eq!(info.rows, 1_000);
    assert!(workspace.perf_warning().is_none());
    assert!(workspace.drain_events().contains(&WorkspaceEvent::DatasetChanged {
        pane: PaneId::new(0),
        bars: 1_000,
    }));
}

#[test]
fn large_dataset_raises_perf_warning() {
    let config = WorkspaceConfig::default().with_large_dataset_bars(500);
    let mut workspace = ChartWorkspace::new(NullRenderer::default(), config).expect("workspace");
    workspace.apply_ingest(ingest(499), None);
    assert!(workspace.perf_warning().is_none());
    workspace.apply_ingest(ingest(500), None);
    assert!(workspace.perf_warning().is_some());
}

#[test]
fn wheel_zoom_targets_hovered_pane_only() {
    let mut workspace = workspace_with(1_000);
    workspace.set_active_pane(PaneId::new(1)).expect("activate");
    workspace.apply_ingest(ingest(1_000), None);
    workspace.set_active_pane(PaneId::new(0)).expect("activate");

    workspace.zoom_wheel(PaneId::new(1), 1.0).expect("zoom");
    assert_eq!(workspace.panes()[1].view_bars(), 250);
    assert_eq!(workspace.panes()[0].view_bars(), 240);

    workspace.zoom_wheel(PaneId::new(1), -1.0).expect("zoom");
    workspace.zoom_wheel(PaneId::new(1), -1.0).expect("zoom");
    assert_eq!(workspace.panes()[1].view_bars(), 230);
}

#[test]
fn wheel_on_empty_pane_collapses_to_min_bars() {
    let mut workspace = workspace_with(1_000);
    assert!(!workspace.panes()[1].has_data());

    workspace.zoom_wheel(PaneId::new(1), 1.0).expect("zoom");
    assert_eq!(window_of(&workspace, 1), (20, 0, 0));
    assert_eq!(workspace.panes()[0].view_bars(), 240);
}

#[test]
fn enabling_sync_catches_up_visible_panes() {
    let mut workspace = workspace_with(1_000);
    workspace.set_active_pane(PaneId::new(1)).expect("activate");
    workspace.apply_ingest(ingest(300), None);
    workspace.set_active_pane(PaneId::new(0)).expect("activate");
    workspace.pan_to(PaneId::new(0), 500).expect("pan");
    assert_eq!(window_of(&workspace, 1), (240, 0, 0));

    assert!(workspace.toggle_sync());
    assert_eq!(window_of(&workspace, 0), (240, 500, 739));
    assert_eq!(window_of(&workspace, 1), (240, 60, 299));

    workspace.set_view_bars(PaneId::new(1), 100).expect("zoom");
    assert_eq!(workspace.panes()[0].view_bars(), 100);
    assert_eq!(workspace.panes()[1].view_bars(), 100);
}

#[test]
fn disabling_sync_lets_panes_diverge() {
    let mut workspace = workspace_with(1_000);
    workspace.set_active_pane(PaneId::new(1)).expect("activate");
    workspace.apply_ingest(ingest(1_000), None);
    workspace.toggle_sync();
    workspace.pan_to(PaneId::new(0), 100).expect("pan");
    assert_eq!(window_of(&workspace, 1), (240, 100, 339));

    assert!(!workspace.toggle_sync());
    assert_eq!(window_of(&workspace, 1), (240, 100, 339));
    workspace.pan_to(PaneId::new(0), 400).expect("pan");
    assert_eq!(window_of(&workspace, 0), (240, 400, 639));
    assert_eq!(window_of(&workspace, 1), (240, 100, 339));
}

#[test]
fn sync_skips_panes_hidden_by_split() {
    let mut workspace = workspace();
    workspace.set_split(SplitLayout::Quad);
    for index in 0..4 {
        workspace.set_active_pane(PaneId::new(index)).expect("activate");
        workspace.apply_ingest(ingest(1_000), None);
    }
    workspace.set_split(SplitLayout::Double);
    workspace.toggle_sync();
    workspace.pan_to(PaneId::new(0), 300).expect("pan");

    assert_eq!(workspace.panes()[1].view_offset(), 300);
    assert_eq!(workspace.panes()[2].view_offset(), 0);
    assert_eq!(workspace.panes()[3].view_offset(), 0);
}

#[test]
fn split_changes_reset_active_pane() {
    let mut workspace = workspace();
    workspace.set_split(SplitLayout::Quad);
    workspace.set_active_pane(PaneId::new(3)).expect("activate");
    workspace.set_split(SplitLayout::Single);
    assert_eq!(workspace.active_pane_id(), PaneId::new(0));
    assert_eq!(workspace.visible_panes().len(), 1);

    let err = workspace
        .set_active_pane(PaneId::new(1))
        .expect_err("hidden pane");
    assert!(matches!(err, ChartError::PaneOutOfRange { index: 1, count: 1 }));
}

#[test]
fn hidden_panes_keep_their_state() {
    let mut workspace = workspace();
    workspace.set_split(SplitLayout::Quad);
    workspace.set_active_pane(PaneId::new(3)).expect("activate");
    workspace.apply_ingest(ingest(800), None);
    workspace.apply_seek(600);

    workspace.set_split(SplitLayout::Single);
    workspace.set_split(SplitLayout::Quad);
    assert_eq!(workspace.panes()[3].bars, 800);
    assert_eq!(workspace.panes()[3].seek(), 600);
}

#[test]
fn playback_advances_seek_and_scrolls() {
    let mut workspace = workspace_with(1_000);
    assert!(workspace.toggle_playing());
    assert!(workspace.playback_clock().is_armed());

    assert_eq!(workspace.advance_playback(Duration::from_millis(500)), 1);
    assert_eq!(workspace.active_pane().seek(), 1);
    assert_eq!(workspace.advance_playback(Duration::from_millis(1_000)), 2);
    assert_eq!(workspace.active_pane().seek(), 3);

    workspace.apply_seek(400);
    workspace.advance_playback(Duration::from_millis(500));
    assert_eq!(window_of(&workspace, 0), (240, 162, 401));
}

#[test]
fn playback_stops_at_last_bar() {
    let mut workspace = workspace_with(30);
    workspace.apply_seek(29);
    assert!(workspace.toggle_playing());
    assert_eq!(workspace.advance_playback(Duration::from_millis(500)), 0);
    assert!(!workspace.active_pane().playing);
    assert_eq!(workspace.active_pane().seek(), 29);
    assert!(!workspace.playback_clock().is_armed());
}

#[test]
fn playback_needs_data() {
    let mut workspace = workspace();
    assert!(!workspace.toggle_playing());
    assert!(!workspace.active_pane().playing);
}

#[test]
fn stale_timer_fires_are_ignored() {
    let mut workspace = workspace_with(1_000);
    workspace.toggle_playing();
    let first = workspace.playback_clock().handle().expect("armed").generation;
    workspace.set_speed(2.0).expect("speed");
    let second = workspace.playback_clock().handle().expect("armed");
    assert_eq!(second.interval, Duration::from_millis(250));

    assert!(!workspace.fire_playback_tick(first));
    assert_eq!(workspace.active_pane().seek(), 0);
    assert!(workspace.fire_playback_tick(second.generation));
    assert_eq!(workspace.active_pane().seek(), 1);
}

#[test]
fn own_ticks_keep_the_same_timer() {
    let mut workspace = workspace_with(1_000);
    workspace.toggle_playing();
    let generation = workspace.playback_clock().handle().expect("armed").generation;
    for _ in 0..5 {
        assert!(workspace.fire_playback_tick(generation));
    }
    assert_eq!(workspace.active_pane().seek(), 5);

    workspace.step_seek(10);
    let rearmed = workspace.playback_clock().handle().expect("armed").generation;
    assert!(rearmed > generation);
}

#[test]
fn switching_active_pane_moves_the_timer() {
    let mut workspace = workspace_with(1_000);
    workspace.toggle_playing();
    workspace.set_active_pane(PaneId::new(1)).expect("activate");
    assert!(!workspace.playback_clock().is_armed());
    workspace.set_active_pane(PaneId::new(0)).expect("activate");
    assert!(workspace.playback_clock().is_armed());
}

#[test]
fn emptied_dataset_stops_playback() {
    let mut workspace = workspace_with(100);
    workspace.toggle_playing();
    workspace.drain_events();
    workspace.apply_ingest(ingest(0), None);

    assert!(!workspace.active_pane().playing);
    assert!(!workspace.playback_clock().is_armed());
    assert!(workspace.drain_events().contains(&WorkspaceEvent::PlaybackChanged {
        pane: PaneId::new(0),
        playing: false,
    }));
}

#[test]
fn invalid_speed_is_rejected() {
    let mut workspace = workspace_with(10);
    assert!(workspace.set_speed(0.0).is_err());
    assert!(workspace.set_speed(f64::NAN).is_err());
    assert_eq!(workspace.active_pane().speed, 1.0);
}

#[test]
fn keyboard_input_drives_workspace() {
    let mut workspace = workspace_with(1_000);
    let key = |key| InputEvent::Key {
        key,
        text_input_focused: false,
    };

    workspace.handle_input(key(Key::Char('4')));
    assert_eq!(workspace.split(), SplitLayout::Quad);

    workspace.handle_input(key(Key::ArrowRight));
    workspace.handle_input(key(Key::ArrowRight));
    workspace.handle_input(key(Key::ArrowLeft));
    assert_eq!(workspace.active_pane().seek(), 1);

    workspace.handle_input(key(Key::Space));
    assert!(workspace.active_pane().playing);

    workspace.handle_input(InputEvent::Key {
        key: Key::Space,
        text_input_focused: true,
    });
    assert!(workspace.active_pane().playing);
}

#[test]
fn pointer_press_selects_pane_and_drag_pans() {
    let mut workspace = workspace();
    workspace.set_active_pane(PaneId::new(1)).expect("activate");
    workspace.apply_ingest(ingest(1_000), None);
    workspace.set_active_pane(PaneId::new(0)).expect("activate");
    let pane = PaneId::new(1);
    workspace.pan_to(pane, 300).expect("pan");

    workspace.handle_input(InputEvent::PointerDown { pane, x: 400.0, y: 20.0 });
    assert_eq!(workspace.active_pane_id(), pane);

    workspace.handle_input(InputEvent::PointerMove { pane, x: 460.0, y: 20.0 });
    assert_eq!(window_of(&workspace, 1), (240, 290, 529));
    workspace.handle_input(InputEvent::PointerUp { pane });
    workspace.handle_input(InputEvent::PointerMove { pane, x: 700.0, y: 20.0 });
    assert_eq!(workspace.panes()[1].view_offset(), 290);
}

#[test]
fn pressing_a_hidden_pane_keeps_active_pane() {
    let mut workspace = workspace_with(500);
    workspace.drain_events();
    let hidden = PaneId::new(3);

    let intents = workspace.handle_input(InputEvent::PointerDown { pane: hidden, x: 10.0, y: 10.0 });
    assert_eq!(intents.len(), 1);
    assert_eq!(workspace.active_pane_id(), PaneId::new(0));
    assert!(
        !workspace
            .drain_events()
            .iter()
            .any(|event| matches!(event, WorkspaceEvent::ActivePaneChanged { .. }))
    );
    workspace.handle_input(InputEvent::PointerUp { pane: hidden });
}

#[test]
fn crosshair_reaches_rendered_frame() {
    let mut workspace = workspace_with(100);
    let pane = PaneId::new(0);
    workspace
        .set_pane_layout(pane, LayoutSize::new(600.0, 300.0), 2.0)
        .expect("layout");
    workspace.handle_input(InputEvent::PointerMove { pane, x: 120.0, y: 80.0 });

    let frame = workspace.render_pane(pane).expect("render");
    assert_eq!(frame.surface.backing().width, 1_200);
    assert_eq!(frame.line_count(), 100 + 2);

    workspace.handle_input(InputEvent::PointerLeave { pane });
    let frame = workspace.render_pane(pane).expect("render");
    assert_eq!(frame.line_count(), 100);
}

#[test]
fn render_visible_draws_each_shown_pane() {
    let mut workspace = workspace_with(50);
    let frames = workspace.render_visible().expect("render");
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].text_count(), 1);
    assert_eq!(workspace.renderer().frames_rendered, 2);
}

#[test]
fn failed_load_keeps_dataset_and_reports_error() {
    let mut workspace = workspace_with(100);
    let mut ingestor = FixtureIngestor {
        bars: 10,
        fail_with: Some("Error: file not found"),
    };
    let err = workspace
        .load_dataset("missing.csv", &mut ingestor, &StandardIndicators::default(), None)
        .expect_err("load fails");
    assert!(matches!(err, ChartError::Collaborator(_)));
    assert_eq!(workspace.last_error(), Some("file not found"));
    assert_eq!(workspace.active_pane().bars, 100);
}

#[test]
fn successful_load_records_history_and_indicators() {
    let mut workspace = workspace();
    let mut history = DatasetHistory::new();
    let mut ingestor = FixtureIngestor {
        bars: 120,
        fail_with: None,
    };
    workspace
        .load_dataset(
            "/data/eurusd.csv",
            &mut ingestor,
            &StandardIndicators::default(),
            Some(&mut history),
        )
        .expect("load");

    assert_eq!(history.entries()[0].path, "/data/eurusd.csv");
    let pane = workspace.active_pane();
    assert_eq!(pane.bars, 120);
    assert_eq!(pane.indicator_series.as_ref().map(|series| series.len()), Some(120));
    assert!(workspace.last_ingest().expect("info").used_cache);
    assert!(workspace.last_error().is_none());
}

#[test]
fn timeframe_switch_resamples_from_raw_dataset() {
    let mut workspace = workspace_with(600);
    let indicators = StandardIndicators::default();

    workspace
        .switch_timeframe(Timeframe::M5, &TimeBucketResampler, &indicators)
        .expect("resample");
    let pane = workspace.active_pane();
    assert_eq!(pane.timeframe, Timeframe::M5);
    assert_eq!(pane.bars, 120);
    assert_eq!(window_of(&workspace, 0), (120, 0, 0));

    workspace
        .switch_timeframe(Timeframe::M1, &TimeBucketResampler, &indicators)
        .expect("resample");
    assert_eq!(workspace.active_pane().bars, 600);
}

#[test]
fn timeframe_switch_without_data_only_relabels() {
    let mut workspace = workspace();
    workspace
        .switch_timeframe(Timeframe::H1, &TimeBucketResampler, &StandardIndicators::default())
        .expect("relabel");
    assert_eq!(workspace.active_pane().timeframe, Timeframe::H1);
    assert!(!workspace.active_pane().has_data());
}

#[test]
fn view_events_report_changes_only() {
    let mut workspace = workspace_with(1_000);
    workspace.drain_events();
    workspace.pan_to(PaneId::new(0), 0).expect("pan");
    assert_eq!(
        workspace.drain_events(),
        vec![WorkspaceEvent::SeekChange {
            pane: PaneId::new(0),
            seek: 239,
        }]
    );
    workspace.pan_to(PaneId::new(0), 0).expect("pan");
    assert!(workspace.drain_events().is_empty());
}
