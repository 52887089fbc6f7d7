mod input;

pub use input::{InputController, InputEvent, InputIntent, InputIntents, Key};

use serde::{Deserialize, Serialize};

use crate::core::LayoutSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}

/// Pointer x and window offset captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragAnchor {
    pub pointer_x: f64,
    pub view_offset: usize,
}

/// Hover guide position in pane-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairState {
    pub x: f64,
    pub y: f64,
}

/// Transient pointer state of one pane. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    drag: Option<DragAnchor>,
    crosshair: Option<CrosshairState>,
    layout: Option<LayoutSize>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn drag_anchor(self) -> Option<DragAnchor> {
        self.drag
    }

    #[must_use]
    pub fn crosshair(self) -> Option<CrosshairState> {
        self.crosshair
    }

    pub fn set_layout(&mut self, layout: LayoutSize) {
        self.layout = Some(layout);
    }

    /// Moves the crosshair, clamped into the pane box when its size is known.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        let (x, y) = match self.layout {
            Some(layout) => (
                x.clamp(0.0, layout.width.max(0.0)),
                y.clamp(0.0, layout.height.max(0.0)),
            ),
            None => (x, y),
        };
        self.crosshair = Some(CrosshairState { x, y });
    }

    pub fn on_pointer_leave(&mut self) {
        self.crosshair = None;
        self.on_pan_end();
    }

    pub fn on_pan_start(&mut self, anchor: DragAnchor) {
        self.mode = InteractionMode::Panning;
        self.drag = Some(anchor);
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
        self.drag = None;
    }
}
