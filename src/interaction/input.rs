use smallvec::SmallVec;

use crate::core::{LayoutSize, PaneId, PaneState, SplitLayout};
use crate::interaction::{DragAnchor, InteractionState};

/// Keys the workspace reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    Char(char),
    Other,
}

/// Raw host input, already routed to a pane where applicable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// `delta_y > 0` scrolls down (zoom out).
    Wheel { pane: PaneId, delta_y: f64 },
    PointerDown { pane: PaneId, x: f64, y: f64 },
    PointerMove { pane: PaneId, x: f64, y: f64 },
    PointerUp { pane: PaneId },
    PointerLeave { pane: PaneId },
    Key { key: Key, text_input_focused: bool },
}

/// Viewport and playback intents derived from input.
///
/// Requested values are raw; clamping happens when they are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputIntent {
    SelectPane(PaneId),
    ViewBars { origin: PaneId, view_bars: i64 },
    ViewOffset { origin: PaneId, view_offset: i64 },
    CrosshairMoved(PaneId),
    TogglePlay,
    SetSplit(SplitLayout),
    StepSeek(i64),
}

pub type InputIntents = SmallVec<[InputIntent; 2]>;

/// Maps pointer, wheel and key events to [`InputIntent`]s and keeps the
/// per-pane drag and crosshair state.
#[derive(Debug, Clone)]
pub struct InputController {
    states: Vec<InteractionState>,
    wheel_step_bars: i64,
    drag_px_per_bar: f64,
}

impl InputController {
    #[must_use]
    pub fn new(pane_count: usize, wheel_step_bars: usize, drag_px_per_bar: f64) -> Self {
        Self {
            states: vec![InteractionState::default(); pane_count],
            wheel_step_bars: i64::try_from(wheel_step_bars).unwrap_or(i64::MAX),
            drag_px_per_bar,
        }
    }

    #[must_use]
    pub fn state(&self, pane: PaneId) -> Option<InteractionState> {
        self.states.get(pane.index()).copied()
    }

    #[must_use]
    pub fn crosshair(&self, pane: PaneId) -> Option<(f64, f64)> {
        self.state(pane)
            .and_then(InteractionState::crosshair)
            .map(|crosshair| (crosshair.x, crosshair.y))
    }

    pub fn set_layout(&mut self, pane: PaneId, layout: LayoutSize) {
        if let Some(state) = self.states.get_mut(pane.index()) {
            state.set_layout(layout);
        }
    }

    pub fn handle(&mut self, event: InputEvent, panes: &[PaneState]) -> InputIntents {
        let mut intents = InputIntents::new();
        match event {
            InputEvent::Wheel { pane, delta_y } => {
                let Some(state) = panes.get(pane.index()) else {
                    return intents;
                };
                let notch = wheel_notch(delta_y);
                if notch != 0 {
                    intents.push(InputIntent::ViewBars {
                        origin: pane,
                        view_bars: to_i64(state.view_bars()) + notch * self.wheel_step_bars,
                    });
                }
            }
            InputEvent::PointerDown { pane, x, .. } => {
                let Some(view_offset) = panes.get(pane.index()).map(PaneState::view_offset) else {
                    return intents;
                };
                if let Some(state) = self.states.get_mut(pane.index()) {
                    state.on_pan_start(DragAnchor {
                        pointer_x: x,
                        view_offset,
                    });
                    intents.push(InputIntent::SelectPane(pane));
                }
            }
            InputEvent::PointerMove { pane, x, y } => {
                let Some(state) = self.states.get_mut(pane.index()) else {
                    return intents;
                };
                state.on_pointer_move(x, y);
                intents.push(InputIntent::CrosshairMoved(pane));

                let has_data = panes.get(pane.index()).is_some_and(PaneState::has_data);
                if let (Some(anchor), true) = (state.drag_anchor(), has_data) {
                    let shift = round_half_up((x - anchor.pointer_x) / self.drag_px_per_bar);
                    intents.push(InputIntent::ViewOffset {
                        origin: pane,
                        view_offset: to_i64(anchor.view_offset) - shift,
                    });
                }
            }
            InputEvent::PointerUp { pane } => {
                if let Some(state) = self.states.get_mut(pane.index()) {
                    state.on_pan_end();
                }
            }
            InputEvent::PointerLeave { pane } => {
                if let Some(state) = self.states.get_mut(pane.index()) {
                    state.on_pointer_leave();
                    intents.push(InputIntent::CrosshairMoved(pane));
                }
            }
            InputEvent::Key {
                key,
                text_input_focused,
            } => {
                if text_input_focused {
                    return intents;
                }
                if let Some(intent) = key_intent(key) {
                    intents.push(intent);
                }
            }
        }
        intents
    }
}

fn key_intent(key: Key) -> Option<InputIntent> {
    match key {
        Key::Space => Some(InputIntent::TogglePlay),
        Key::ArrowLeft => Some(InputIntent::StepSeek(-1)),
        Key::ArrowRight => Some(InputIntent::StepSeek(1)),
        Key::Char(digit) => digit
            .to_digit(10)
            .and_then(|count| SplitLayout::from_count(count as usize))
            .map(InputIntent::SetSplit),
        Key::Other => None,
    }
}

fn wheel_notch(delta_y: f64) -> i64 {
    if delta_y > 0.0 {
        1
    } else if delta_y < 0.0 {
        -1
    } else {
        0
    }
}

/// Rounds halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{InputIntent, Key, key_intent, round_half_up};
    use crate::core::SplitLayout;

    #[test]
    fn digits_map_to_split_layouts() {
        assert_eq!(
            key_intent(Key::Char('4')),
            Some(InputIntent::SetSplit(SplitLayout::Quad))
        );
        assert_eq!(key_intent(Key::Char('3')), None);
        assert_eq!(key_intent(Key::Char('x')), None);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }
}
