use tracing::info;

use crate::collab::PresetStore;
use crate::core::{PaneState, ViewWindow};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartWorkspace, PaneSnapshot, Preset};

impl<R: Renderer> ChartWorkspace<R> {
    /// Captures split and every pane (visible or not) under `name`.
    pub fn snapshot_preset(&self, name: impl Into<String>) -> ChartResult<Preset> {
        Preset::new(
            name,
            self.split,
            self.panes.iter().map(PaneSnapshot::capture).collect(),
        )
    }

    /// Restores split and pane fields from `preset`.
    ///
    /// Datasets are not loaded: each pane keeps whatever data it holds and the
    /// restored window is re-clamped against it. Playback stops everywhere and
    /// pane 0 becomes active.
    pub fn apply_preset(&mut self, preset: &Preset) -> ChartResult<()> {
        preset.validate()?;
        info!(name = %preset.name, split = ?preset.split, panes = preset.panes.len(), "preset applied");

        for (index, snapshot) in preset.panes.iter().enumerate().take(self.panes.len()) {
            self.set_playing(index, false);
            let min_view_bars = self.config.min_view_bars;
            let pane = &mut self.panes[index];
            restore_fields(pane, snapshot);
            let window = ViewWindow::from_parts(
                pane.total_bars(),
                snapshot.view_bars,
                snapshot.view_offset,
                snapshot.seek,
            )
            .with_min_bars_cap(min_view_bars);
            self.install_window(index, window);
        }

        self.set_split(preset.split);
        Ok(())
    }

    /// Snapshots the workspace and hands it to `store`.
    pub fn save_preset<S>(&mut self, name: &str, store: &mut S) -> ChartResult<()>
    where
        S: PresetStore + ?Sized,
    {
        let outcome = self
            .snapshot_preset(name)
            .and_then(|preset| store.save(preset));
        outcome.map_err(|err| self.record_collaborator_error(err))
    }

    /// Loads `name` from `store` and applies it.
    pub fn load_preset<S>(&mut self, name: &str, store: &S) -> ChartResult<()>
    where
        S: PresetStore + ?Sized,
    {
        let outcome = store.load(name).and_then(|preset| self.apply_preset(&preset));
        outcome.map_err(|err| self.record_collaborator_error(err))
    }
}

fn restore_fields(pane: &mut PaneState, snapshot: &PaneSnapshot) {
    pane.pair.clone_from(&snapshot.pair);
    pane.timeframe = snapshot.timeframe;
    pane.indicator = snapshot.indicator;
    if snapshot.speed.is_finite() && snapshot.speed > 0.0 {
        pane.speed = snapshot.speed;
    }
    if !pane.has_data() {
        pane.bars = snapshot.bars;
    }
}
