use std::time::Duration;

use tracing::info;

use crate::render::Renderer;

use super::playback_clock::next_tick_seek;
use super::{ChartWorkspace, ViewMutation, WorkspaceEvent};

impl<R: Renderer> ChartWorkspace<R> {
    /// Starts or stops playback on the active pane.
    ///
    /// Starting requires data; returns the resulting play state.
    pub fn toggle_playing(&mut self) -> bool {
        let active = &self.panes[self.active];
        let next = !active.playing;
        if next && active.total_bars() == 0 {
            return false;
        }
        self.set_playing(self.active, next);
        next
    }

    /// Feeds elapsed wall time to the clock and applies due ticks.
    ///
    /// Returns how many ticks moved the seek.
    pub fn advance_playback(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        let mut applied = 0;
        for _ in 0..due {
            if !self.apply_playback_tick() {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Applies one tick fired by a host timer armed for `generation`.
    ///
    /// Fires from a torn-down timer are ignored.
    pub fn fire_playback_tick(&mut self, generation: u64) -> bool {
        self.clock.fire(generation) && self.apply_playback_tick()
    }

    fn apply_playback_tick(&mut self) -> bool {
        let active = &self.panes[self.active];
        if !active.playing {
            return false;
        }
        match next_tick_seek(active.seek(), active.total_bars()) {
            Some(next) => {
                self.clock.note_tick_applied(next);
                self.broadcast(self.active, ViewMutation::ApplySeek(next as i64));
                true
            }
            None => {
                self.set_playing(self.active, false);
                false
            }
        }
    }

    pub(super) fn set_playing(&mut self, index: usize, playing: bool) {
        let pane = &mut self.panes[index];
        if pane.playing != playing {
            pane.playing = playing;
            let id = pane.id;
            info!(pane = id.index(), playing, seek = pane.seek(), "playback changed");
            self.events
                .push(WorkspaceEvent::PlaybackChanged { pane: id, playing });
        }
        self.reconcile_clock();
    }
}
