//! Fan-out of window mutations across panes.
//!
//! Everything here is pure: callers pass the current windows, the sync flag
//! and the visible pane count, and get the next windows back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ViewWindow;

/// One clamped window mutation, applied per target pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMutation {
    ViewBars(i64),
    ViewOffset(i64),
    /// Clamp seek without moving the window.
    UpdateSeek(i64),
    /// Clamp seek and re-center the window on it.
    ApplySeek(i64),
}

impl ViewMutation {
    #[must_use]
    pub fn apply(self, window: ViewWindow) -> ViewWindow {
        match self {
            Self::ViewBars(bars) => window.with_view_bars(bars),
            Self::ViewOffset(offset) => window.with_view_offset(offset),
            Self::UpdateSeek(seek) => window.with_updated_seek(seek),
            Self::ApplySeek(seek) => window.with_applied_seek(seek),
        }
    }
}

pub type PaneTargets = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncCoordinator;

impl SyncCoordinator {
    /// Pane indices a mutation from `origin` reaches.
    ///
    /// Without sync only `origin`; with sync every visible pane, plus `origin`
    /// when it sits beyond the visible split.
    #[must_use]
    pub fn targets(origin: usize, sync_enabled: bool, visible: usize, pane_count: usize) -> PaneTargets {
        let mut targets = PaneTargets::new();
        if sync_enabled {
            targets.extend(0..visible.min(pane_count));
        }
        if origin < pane_count && !targets.contains(&origin) {
            targets.push(origin);
        }
        targets
    }

    /// Next windows of all panes after `mutation` fans out from `origin`.
    #[must_use]
    pub fn broadcast(
        windows: &[ViewWindow],
        origin: usize,
        mutation: ViewMutation,
        sync_enabled: bool,
        visible: usize,
    ) -> Vec<ViewWindow> {
        let targets = Self::targets(origin, sync_enabled, visible, windows.len());
        windows
            .iter()
            .enumerate()
            .map(|(index, window)| {
                if targets.contains(&index) {
                    mutation.apply(*window)
                } else {
                    *window
                }
            })
            .collect()
    }

    /// One-time catch-up when sync turns on: every other visible pane adopts
    /// the anchor's `(view_bars, view_offset, seek)`, re-clamped against its
    /// own dataset.
    #[must_use]
    pub fn catch_up(windows: &[ViewWindow], anchor: usize, visible: usize) -> Vec<ViewWindow> {
        let Some(anchor_window) = windows.get(anchor).copied() else {
            return windows.to_vec();
        };
        windows
            .iter()
            .enumerate()
            .map(|(index, window)| {
                if index != anchor && index < visible {
                    window.adopting(anchor_window)
                } else {
                    *window
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{SyncCoordinator, ViewMutation};
    use crate::core::ViewWindow;

    #[test]
    fn unsynced_targets_only_origin() {
        assert_eq!(SyncCoordinator::targets(1, false, 4, 4).as_slice(), &[1]);
    }

    #[test]
    fn synced_targets_are_bounded_by_split() {
        assert_eq!(SyncCoordinator::targets(0, true, 2, 4).as_slice(), &[0, 1]);
        assert_eq!(SyncCoordinator::targets(3, true, 2, 4).as_slice(), &[0, 1, 3]);
    }

    #[test]
    fn out_of_range_origin_reaches_nothing_when_unsynced() {
        assert!(SyncCoordinator::targets(7, false, 4, 4).is_empty());
    }

    #[test]
    fn update_seek_leaves_window_in_place() {
        let window = ViewWindow::for_dataset(300, 240, 20);
        let next = ViewMutation::UpdateSeek(280).apply(window);
        assert_eq!((next.view_offset(), next.seek()), (0, 280));
    }
}
