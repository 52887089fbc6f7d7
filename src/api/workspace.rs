use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{LayoutSize, PaneId, PaneState, SplitLayout, ViewWindow};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InputController;
use crate::render::{RenderPipeline, RenderStyle, Renderer, SurfaceSpec};

use super::{PlaybackClock, TimerDeps, WorkspaceConfig, WorkspaceEvent};

/// Summary of the most recent successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestInfo {
    pub path: String,
    pub rows: usize,
    pub used_cache: bool,
}

/// Multi-pane chart workspace consumed by host applications.
///
/// Owns every pane, the split layout, the active pane, the sync flag and the
/// playback clock. All mutations run synchronously on the caller's thread;
/// hosts drain [`WorkspaceEvent`]s afterwards to refresh their controls.
pub struct ChartWorkspace<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: WorkspaceConfig,
    pub(super) panes: Vec<PaneState>,
    pub(super) surfaces: Vec<SurfaceSpec>,
    pub(super) split: SplitLayout,
    pub(super) active: usize,
    pub(super) sync_enabled: bool,
    pub(super) clock: PlaybackClock,
    pub(super) input: InputController,
    pub(super) pipeline: RenderPipeline,
    pub(super) events: Vec<WorkspaceEvent>,
    pub(super) last_error: Option<String>,
    pub(super) perf_warning: Option<String>,
    pub(super) last_ingest: Option<IngestInfo>,
}

impl<R: Renderer> ChartWorkspace<R> {
    pub fn new(renderer: R, config: WorkspaceConfig) -> ChartResult<Self> {
        config.validate()?;

        let panes = (0..config.pane_count)
            .map(|index| {
                let mut pane = PaneState::new(
                    PaneId::new(index),
                    config.default_pair.clone(),
                    config.default_timeframe,
                    config.default_view_bars,
                );
                pane.window = ViewWindow::empty(config.default_view_bars)
                    .with_min_bars_cap(config.min_view_bars);
                pane
            })
            .collect();
        let default_surface = SurfaceSpec::from_layout(LayoutSize::new(1.0, 1.0), 1.0);

        Ok(Self {
            renderer,
            surfaces: vec![default_surface; config.pane_count],
            split: config.initial_split,
            active: 0,
            sync_enabled: false,
            clock: PlaybackClock::new(
                Duration::from_millis(config.base_playback_ms),
                Duration::from_millis(config.min_playback_interval_ms),
            ),
            input: InputController::new(
                config.pane_count,
                config.wheel_step_bars,
                config.drag_px_per_bar,
            ),
            pipeline: RenderPipeline::default(),
            events: Vec::new(),
            last_error: None,
            perf_warning: None,
            last_ingest: None,
            panes,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    #[must_use]
    pub fn panes(&self) -> &[PaneState] {
        &self.panes
    }

    /// Panes currently shown by the split layout.
    #[must_use]
    pub fn visible_panes(&self) -> &[PaneState] {
        &self.panes[..self.visible_count()]
    }

    pub fn pane(&self, pane: PaneId) -> ChartResult<&PaneState> {
        self.panes.get(pane.index()).ok_or(ChartError::PaneOutOfRange {
            index: pane.index(),
            count: self.panes.len(),
        })
    }

    #[must_use]
    pub fn active_pane(&self) -> &PaneState {
        &self.panes[self.active]
    }

    #[must_use]
    pub fn active_pane_id(&self) -> PaneId {
        PaneId::new(self.active)
    }

    #[must_use]
    pub fn split(&self) -> SplitLayout {
        self.split
    }

    #[must_use]
    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }

    #[must_use]
    pub fn playback_clock(&self) -> &PlaybackClock {
        &self.clock
    }

    #[must_use]
    pub fn input_controller(&self) -> &InputController {
        &self.input
    }

    /// Collaborator failure message of the last data operation, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Advisory shown for very large datasets.
    #[must_use]
    pub fn perf_warning(&self) -> Option<&str> {
        self.perf_warning.as_deref()
    }

    #[must_use]
    pub fn last_ingest(&self) -> Option<&IngestInfo> {
        self.last_ingest.as_ref()
    }

    #[must_use]
    pub fn render_style(&self) -> &RenderStyle {
        self.pipeline.style()
    }

    pub fn set_render_style(&mut self, style: RenderStyle) {
        self.pipeline = RenderPipeline::new(style);
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Takes every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<WorkspaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn visible_count(&self) -> usize {
        self.split.pane_count().min(self.panes.len())
    }

    pub(super) fn checked_index(&self, pane: PaneId) -> ChartResult<usize> {
        let index = pane.index();
        if index < self.panes.len() {
            Ok(index)
        } else {
            Err(ChartError::PaneOutOfRange {
                index,
                count: self.panes.len(),
            })
        }
    }

    /// Installs `window` on pane `index` and queues view/seek events for
    /// whatever changed.
    pub(super) fn install_window(&mut self, index: usize, window: ViewWindow) {
        let Some(pane) = self.panes.get_mut(index) else {
            return;
        };
        let before = pane.window;
        pane.window = window;
        let id = pane.id;
        if (before.view_bars(), before.view_offset()) != (window.view_bars(), window.view_offset()) {
            self.events.push(WorkspaceEvent::ViewChange {
                pane: id,
                view_bars: window.view_bars(),
                view_offset: window.view_offset(),
            });
        }
        if before.seek() != window.seek() {
            self.events.push(WorkspaceEvent::SeekChange {
                pane: id,
                seek: window.seek(),
            });
        }
    }

    pub(super) fn commit_windows(&mut self, windows: Vec<ViewWindow>) {
        for (index, window) in windows.into_iter().enumerate() {
            self.install_window(index, window);
        }
        self.reconcile_clock();
    }

    pub(super) fn windows(&self) -> Vec<ViewWindow> {
        self.panes.iter().map(|pane| pane.window).collect()
    }

    /// Re-derives the playback timer from the active pane.
    pub(super) fn reconcile_clock(&mut self) {
        let active = &self.panes[self.active];
        self.clock.reconcile(TimerDeps {
            pane: active.id,
            playing: active.playing,
            speed: active.speed,
            total_bars: active.total_bars(),
            seek: active.seek(),
        });
    }
}
