//! fxchart: multi-pane candle chart viewer core.
//!
//! Up to four independent panes each hold a dataset, a clamped view window,
//! a playback cursor and a drawing style. Panes can be synchronized so view
//! gestures on one replay on every visible pane. Drawing goes through a
//! backend-agnostic [`render::Renderer`]; a Cairo backend and a GTK4 adapter
//! are available behind features.

pub mod api;
pub mod collab;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartWorkspace, WorkspaceConfig};
pub use error::{ChartError, ChartResult};
