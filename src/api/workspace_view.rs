use tracing::info;

use crate::core::{ChartStyle, IndicatorKind, PaneId, SplitLayout};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartWorkspace, SyncCoordinator, ViewMutation, WorkspaceEvent};

impl<R: Renderer> ChartWorkspace<R> {
    /// Shows `split` panes and makes the first one active.
    pub fn set_split(&mut self, split: SplitLayout) {
        if self.split != split {
            self.split = split;
            self.events.push(WorkspaceEvent::SplitChanged { split });
        }
        self.activate(0);
    }

    /// Makes a visible pane the target of keyboard and playback intents.
    pub fn set_active_pane(&mut self, pane: PaneId) -> ChartResult<()> {
        let visible = self.visible_count();
        if pane.index() >= visible {
            return Err(ChartError::PaneOutOfRange {
                index: pane.index(),
                count: visible,
            });
        }
        self.activate(pane.index());
        Ok(())
    }

    fn activate(&mut self, index: usize) {
        if self.active != index {
            self.active = index;
            self.events.push(WorkspaceEvent::ActivePaneChanged {
                pane: PaneId::new(index),
            });
        }
        self.reconcile_clock();
    }

    /// Flips sync mode. Turning it on copies the active pane's window onto
    /// every other visible pane once.
    pub fn toggle_sync(&mut self) -> bool {
        self.sync_enabled = !self.sync_enabled;
        if self.sync_enabled {
            let next = SyncCoordinator::catch_up(&self.windows(), self.active, self.visible_count());
            self.commit_windows(next);
        }
        info!(enabled = self.sync_enabled, anchor = self.active, "sync toggled");
        self.events.push(WorkspaceEvent::SyncChanged {
            enabled: self.sync_enabled,
        });
        self.sync_enabled
    }

    pub fn set_pair(&mut self, pair: impl Into<String>) {
        self.panes[self.active].pair = pair.into();
    }

    pub fn set_chart_style(&mut self, style: ChartStyle) {
        self.panes[self.active].chart_style = style;
    }

    pub fn set_indicator_kind(&mut self, kind: IndicatorKind) {
        self.panes[self.active].indicator = kind;
    }

    /// Playback multiplier of the active pane.
    pub fn set_speed(&mut self, speed: f64) -> ChartResult<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ChartError::InvalidData(
                "playback speed must be finite and > 0".to_owned(),
            ));
        }
        self.panes[self.active].speed = speed;
        self.reconcile_clock();
        Ok(())
    }

    /// One wheel notch on `pane`: `delta_y > 0` zooms out, `< 0` zooms in.
    pub fn zoom_wheel(&mut self, pane: PaneId, delta_y: f64) -> ChartResult<()> {
        let index = self.checked_index(pane)?;
        let step = i64::try_from(self.config.wheel_step_bars).unwrap_or(i64::MAX);
        let notch = if delta_y > 0.0 {
            1
        } else if delta_y < 0.0 {
            -1
        } else {
            return Ok(());
        };
        let current = i64::try_from(self.panes[index].view_bars()).unwrap_or(i64::MAX);
        self.set_view_bars(pane, current.saturating_add(notch * step))
    }

    pub fn set_view_bars(&mut self, origin: PaneId, view_bars: i64) -> ChartResult<()> {
        let index = self.checked_index(origin)?;
        self.broadcast(index, ViewMutation::ViewBars(view_bars));
        Ok(())
    }

    /// Pans so the window starts at `view_offset`; seek follows the trailing
    /// edge.
    pub fn pan_to(&mut self, origin: PaneId, view_offset: i64) -> ChartResult<()> {
        let index = self.checked_index(origin)?;
        self.broadcast(index, ViewMutation::ViewOffset(view_offset));
        Ok(())
    }

    /// Moves seek on the active pane (and synced panes) without re-centering.
    pub fn update_seek(&mut self, seek: i64) {
        self.broadcast(self.active, ViewMutation::UpdateSeek(seek));
    }

    /// Moves seek on the active pane (and synced panes) and re-centers.
    pub fn apply_seek(&mut self, seek: i64) {
        self.broadcast(self.active, ViewMutation::ApplySeek(seek));
    }

    pub fn step_seek(&mut self, delta: i64) {
        let seek = i64::try_from(self.active_pane().seek()).unwrap_or(i64::MAX);
        self.apply_seek(seek.saturating_add(delta));
    }

    pub(super) fn broadcast(&mut self, origin: usize, mutation: ViewMutation) {
        let next = SyncCoordinator::broadcast(
            &self.windows(),
            origin,
            mutation,
            self.sync_enabled,
            self.visible_count(),
        );
        self.commit_windows(next);
    }
}
