//! GTK4 embedding: one `DrawingArea` per pane, input controllers wired to
//! [`ChartWorkspace::handle_input`] and playback ticks driven by GLib
//! timeouts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gtk4 as gtk;
use gtk::prelude::*;
use gtk::{gdk, glib};
use tracing::{debug, warn};

use crate::api::ChartWorkspace;
use crate::core::{LayoutSize, PaneId};
use crate::interaction::{InputEvent, Key};
use crate::render::CairoRenderer;

pub type SharedWorkspace = Rc<RefCell<ChartWorkspace<CairoRenderer>>>;

struct ArmedTimer {
    generation: u64,
    source: glib::SourceId,
}

struct AdapterState {
    workspace: SharedWorkspace,
    areas: Vec<gtk::DrawingArea>,
    timer: RefCell<Option<ArmedTimer>>,
}

/// Hosts a [`ChartWorkspace`] inside GTK widgets.
///
/// Host code that mutates the workspace directly (loading data, presets)
/// should call [`GtkWorkspaceAdapter::refresh`] afterwards.
pub struct GtkWorkspaceAdapter {
    state: Rc<AdapterState>,
}

impl GtkWorkspaceAdapter {
    #[must_use]
    pub fn new(workspace: ChartWorkspace<CairoRenderer>) -> Self {
        let pane_count = workspace.panes().len();
        let areas = (0..pane_count)
            .map(|_| {
                let area = gtk::DrawingArea::new();
                area.set_hexpand(true);
                area.set_vexpand(true);
                area
            })
            .collect();
        let state = Rc::new(AdapterState {
            workspace: Rc::new(RefCell::new(workspace)),
            areas,
            timer: RefCell::new(None),
        });
        for index in 0..pane_count {
            install_pane_handlers(&state, index);
        }
        refresh(&state);
        Self { state }
    }

    #[must_use]
    pub fn workspace(&self) -> SharedWorkspace {
        Rc::clone(&self.state.workspace)
    }

    #[must_use]
    pub fn drawing_area(&self, pane: PaneId) -> Option<&gtk::DrawingArea> {
        self.state.areas.get(pane.index())
    }

    #[must_use]
    pub fn drawing_areas(&self) -> &[gtk::DrawingArea] {
        &self.state.areas
    }

    /// Routes key presses on `window` to the workspace. Keys typed into a
    /// text field are left alone.
    pub fn attach_keyboard(&self, window: &impl IsA<gtk::Widget>) {
        let controller = gtk::EventControllerKey::new();
        let weak = Rc::downgrade(&self.state);
        controller.connect_key_pressed(move |controller, keyval, _keycode, _modifiers| {
            let Some(state) = weak.upgrade() else {
                return glib::Propagation::Proceed;
            };
            let event = InputEvent::Key {
                key: map_key(keyval),
                text_input_focused: text_input_focused(controller),
            };
            if dispatch(&state, event) {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        window.add_controller(controller);
    }

    /// Shows the panes of the current split, redraws them and re-syncs the
    /// playback timer with the workspace clock.
    pub fn refresh(&self) {
        refresh(&self.state);
    }
}

impl Drop for GtkWorkspaceAdapter {
    fn drop(&mut self) {
        if let Some(timer) = self.state.timer.borrow_mut().take() {
            timer.source.remove();
        }
    }
}

fn install_pane_handlers(state: &Rc<AdapterState>, index: usize) {
    let pane = PaneId::new(index);
    let area = &state.areas[index];

    let weak = Rc::downgrade(state);
    area.set_draw_func(move |area, context, width, height| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let Ok(mut workspace) = state.workspace.try_borrow_mut() else {
            return;
        };
        let layout = LayoutSize::new(f64::from(width), f64::from(height));
        let dpr = f64::from(area.scale_factor());
        let outcome = workspace
            .set_pane_layout(pane, layout, dpr)
            .and_then(|()| workspace.render_pane_on_cairo_context(pane, context));
        if let Err(err) = outcome {
            warn!(pane = index, error = %err, "pane draw failed");
        }
    });

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    let weak = Rc::downgrade(state);
    scroll.connect_scroll(move |_, _dx, dy| {
        if let Some(state) = weak.upgrade() {
            dispatch(&state, InputEvent::Wheel { pane, delta_y: dy });
        }
        glib::Propagation::Stop
    });
    area.add_controller(scroll);

    let drag = gtk::GestureDrag::new();
    let weak = Rc::downgrade(state);
    drag.connect_drag_begin(move |_, x, y| {
        if let Some(state) = weak.upgrade() {
            dispatch(&state, InputEvent::PointerDown { pane, x, y });
        }
    });
    let weak = Rc::downgrade(state);
    drag.connect_drag_update(move |gesture, offset_x, offset_y| {
        let (Some(state), Some((start_x, start_y))) = (weak.upgrade(), gesture.start_point()) else {
            return;
        };
        dispatch(
            &state,
            InputEvent::PointerMove {
                pane,
                x: start_x + offset_x,
                y: start_y + offset_y,
            },
        );
    });
    let weak = Rc::downgrade(state);
    drag.connect_drag_end(move |_, _, _| {
        if let Some(state) = weak.upgrade() {
            dispatch(&state, InputEvent::PointerUp { pane });
        }
    });
    area.add_controller(drag);

    let motion = gtk::EventControllerMotion::new();
    let weak = Rc::downgrade(state);
    motion.connect_motion(move |_, x, y| {
        if let Some(state) = weak.upgrade() {
            dispatch(&state, InputEvent::PointerMove { pane, x, y });
        }
    });
    let weak = Rc::downgrade(state);
    motion.connect_leave(move |_| {
        if let Some(state) = weak.upgrade() {
            dispatch(&state, InputEvent::PointerLeave { pane });
        }
    });
    area.add_controller(motion);
}

/// Applies `event` and refreshes widgets. Returns whether any intent fired.
fn dispatch(state: &Rc<AdapterState>, event: InputEvent) -> bool {
    let intents = match state.workspace.try_borrow_mut() {
        Ok(mut workspace) => workspace.handle_input(event),
        Err(_) => return false,
    };
    if intents.is_empty() {
        return false;
    }
    refresh(state);
    true
}

fn refresh(state: &Rc<AdapterState>) {
    let visible = match state.workspace.try_borrow() {
        Ok(workspace) => workspace.visible_panes().len(),
        Err(_) => return,
    };
    for (index, area) in state.areas.iter().enumerate() {
        area.set_visible(index < visible);
        if index < visible {
            area.queue_draw();
        }
    }
    sync_timer(state);
}

/// Tears down and re-creates the GLib timeout whenever the clock's handle
/// generation changes.
fn sync_timer(state: &Rc<AdapterState>) {
    let Ok(workspace) = state.workspace.try_borrow() else {
        return;
    };
    let handle = workspace.playback_clock().handle();
    drop(workspace);

    let mut slot = state.timer.borrow_mut();
    if slot.as_ref().map(|timer| timer.generation) == handle.map(|handle| handle.generation) {
        return;
    }
    if let Some(old) = slot.take() {
        old.source.remove();
    }
    if let Some(handle) = handle {
        debug!(generation = handle.generation, interval = ?handle.interval, "scheduling playback timeout");
        let weak = Rc::downgrade(state);
        let generation = handle.generation;
        let source = glib::timeout_add_local(handle.interval, move || on_timer(&weak, generation));
        *slot = Some(ArmedTimer { generation, source });
    }
}

fn on_timer(weak: &Weak<AdapterState>, generation: u64) -> glib::ControlFlow {
    let Some(state) = weak.upgrade() else {
        return glib::ControlFlow::Break;
    };
    let still_armed = match state.workspace.try_borrow_mut() {
        Ok(mut workspace) => {
            // Stale or stopping ticks are rejected inside the workspace.
            let _ = workspace.fire_playback_tick(generation);
            workspace
                .playback_clock()
                .handle()
                .is_some_and(|handle| handle.generation == generation)
        }
        Err(_) => return glib::ControlFlow::Continue,
    };

    if still_armed {
        refresh(&state);
        return glib::ControlFlow::Continue;
    }
    // Returning Break destroys this source; forget it before re-syncing.
    {
        let mut slot = state.timer.borrow_mut();
        if slot.as_ref().is_some_and(|timer| timer.generation == generation) {
            *slot = None;
        }
    }
    refresh(&state);
    glib::ControlFlow::Break
}

fn map_key(keyval: gdk::Key) -> Key {
    if keyval == gdk::Key::space {
        Key::Space
    } else if keyval == gdk::Key::Left {
        Key::ArrowLeft
    } else if keyval == gdk::Key::Right {
        Key::ArrowRight
    } else {
        keyval.to_unicode().map_or(Key::Other, Key::Char)
    }
}

fn text_input_focused(controller: &gtk::EventControllerKey) -> bool {
    controller
        .widget()
        .and_then(|widget| widget.root())
        .and_then(|root| root.focus())
        .is_some_and(|focus| focus.is::<gtk::Text>() || focus.is::<gtk::TextView>())
}
