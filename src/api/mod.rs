//! Workspace facade consumed by host applications.
//!
//! [`ChartWorkspace`] is split across several `impl` blocks: view and sync
//! mutations, playback, dataset application, presets, input dispatch and
//! render coordination each live in their own file.

mod input_dispatch;
mod playback_clock;
mod preset_snapshot;
mod render_coordinator;
mod sync_coordinator;
mod workspace;
mod workspace_config;
mod workspace_data;
mod workspace_events;
mod workspace_playback;
mod workspace_presets;
mod workspace_view;

pub use playback_clock::{ClockTransition, PlaybackClock, TimerDeps, TimerHandle, next_tick_seek};
pub use preset_snapshot::{PaneSnapshot, Preset};
pub use sync_coordinator::{PaneTargets, SyncCoordinator, ViewMutation};
pub use workspace::{ChartWorkspace, IngestInfo};
pub use workspace_config::WorkspaceConfig;
pub use workspace_events::WorkspaceEvent;
