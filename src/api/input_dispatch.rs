use tracing::{debug, trace};

use crate::interaction::{InputEvent, InputIntent, InputIntents};
use crate::render::Renderer;

use super::ChartWorkspace;

impl<R: Renderer> ChartWorkspace<R> {
    /// Routes one host input event through the input controller and applies
    /// the resulting intents in order.
    ///
    /// Returns the intents so hosts can decide which panes to redraw.
    pub fn handle_input(&mut self, event: InputEvent) -> InputIntents {
        let intents = self.input.handle(event, &self.panes);
        for intent in &intents {
            trace!(?intent, "input intent");
            self.apply_intent(*intent);
        }
        intents
    }

    fn apply_intent(&mut self, intent: InputIntent) {
        let outcome = match intent {
            InputIntent::SelectPane(pane) => self.set_active_pane(pane),
            InputIntent::ViewBars { origin, view_bars } => self.set_view_bars(origin, view_bars),
            InputIntent::ViewOffset {
                origin,
                view_offset,
            } => self.pan_to(origin, view_offset),
            InputIntent::CrosshairMoved(_) => Ok(()),
            InputIntent::TogglePlay => {
                self.toggle_playing();
                Ok(())
            }
            InputIntent::SetSplit(split) => {
                self.set_split(split);
                Ok(())
            }
            InputIntent::StepSeek(delta) => {
                self.step_seek(delta);
                Ok(())
            }
        };
        // Pointer events on a hidden pane select nothing; the gesture is dropped.
        if let Err(err) = outcome {
            debug!(?intent, error = %err, "input intent ignored");
        }
    }
}
