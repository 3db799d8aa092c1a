//! Browser runtime: timers, animation frames and pointer input.
//!
//! Two independent clocks drive a mounted board:
//! - a fixed `Interval` (~60 Hz) that steps physics and finishes exit
//!   transitions,
//! - a `requestAnimationFrame` loop that polls positions and hands them to
//!   the page. It runs only while the board has cards and is restarted by
//!   the next add.
//!
//! Dropping or disposing a `BoardApp` cancels both and releases the world.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Interval;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent};

use crate::core::clock;
use crate::domain::card::CardId;
use crate::domain::config::BoardConfig;
use crate::presentation::board_view::CLEAR_CONFIRM_PROMPT;
use crate::simulation::BoardCore;

struct Shared {
    core: RefCell<BoardCore>,
    frame: RefCell<Option<AnimationFrame>>,
    on_frame: js_sys::Function,
}

fn schedule_frame(shared: &Rc<Shared>) {
    if shared.frame.borrow().is_some() {
        return;
    }
    let next = Rc::clone(shared);
    let handle = request_animation_frame(move |_| {
        next.frame.borrow_mut().take();
        let (json, more) = {
            let mut core = next.core.borrow_mut();
            let snapshot = core.sync_frame();
            (snapshot.to_json(), core.wants_frames())
        };
        if let Err(err) = next.on_frame.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            warn!("frame callback threw: {err:?}");
        }
        if more {
            schedule_frame(&next);
        }
    });
    *shared.frame.borrow_mut() = Some(handle);
}

/// Pointer position relative to the container's top-left corner. Events
/// bubble up from card elements, so the event target's own offset is not
/// usable here.
fn pointer_position(container: &HtmlElement, event: &web_sys::Event) -> Option<(f32, f32)> {
    let event = event.dyn_ref::<PointerEvent>()?;
    let rect = container.get_bounding_client_rect();
    let x = event.client_x() as f64 - rect.left();
    let y = event.client_y() as f64 - rect.top();
    Some((x as f32, y as f32))
}

/// A board mounted on a DOM container.
#[wasm_bindgen]
pub struct BoardApp {
    shared: Rc<Shared>,
    container: HtmlElement,
    step_timer: Option<Interval>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl BoardApp {
    /// Mount on `container`. `on_frame` receives the frame JSON
    /// (`{frame, positions}`) once per animation frame while cards exist.
    pub fn mount(
        container: HtmlElement,
        config_json: Option<String>,
        on_frame: js_sys::Function,
    ) -> Result<BoardApp, JsValue> {
        let config = match config_json {
            Some(json) => BoardConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => BoardConfig::default(),
        };
        let interval_ms = config.step_interval_ms();

        let mut core = BoardCore::new(config);
        // A container that is not laid out yet gets its arena on `resize`.
        if let Err(err) = core.set_layout(container.client_width() as f32, container.client_height() as f32) {
            warn!("mounting without physics: {err}");
        }

        let shared = Rc::new(Shared {
            core: RefCell::new(core),
            frame: RefCell::new(None),
            on_frame,
        });

        let tick = Rc::clone(&shared);
        let step_timer = Interval::new(interval_ms, move || {
            let mut core = tick.core.borrow_mut();
            core.step_physics();
            core.advance(clock::now_ms());
        });

        let mut app = BoardApp {
            shared,
            container,
            step_timer: Some(step_timer),
            listeners: Vec::new(),
        };
        app.install_listeners();
        info!("board mounted, stepping every {interval_ms} ms");
        Ok(app)
    }

    pub fn add_task(&mut self, title: &str) -> Option<String> {
        let id = self.shared.core.borrow_mut().add_task(title, clock::now_ms())?;
        schedule_frame(&self.shared);
        Some(id.to_string())
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        self.shared
            .core
            .borrow_mut()
            .delete_task(&CardId::from(id), clock::now_ms())
    }

    /// Ask the user, then clear everything if they agree
    pub fn request_clear(&mut self) -> bool {
        if self.shared.core.borrow().card_count() == 0 {
            return false;
        }
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(CLEAR_CONFIRM_PROMPT).ok())
            .unwrap_or(false);
        self.shared.core.borrow_mut().clear_board(confirmed, clock::now_ms())
    }

    pub fn toggle_physics(&mut self) -> bool {
        self.shared.core.borrow_mut().toggle_physics()
    }

    /// Rebuild the arena after the container changed size
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let width = self.container.client_width() as f32;
        let height = self.container.client_height() as f32;
        self.shared
            .core
            .borrow_mut()
            .set_layout(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn card_count(&self) -> usize {
        self.shared.core.borrow().card_count()
    }

    /// Whether an animation frame is queued
    #[wasm_bindgen(getter)]
    pub fn frame_pending(&self) -> bool {
        self.shared.frame.borrow().is_some()
    }

    /// Whether the fixed-rate step timer is running
    #[wasm_bindgen(getter)]
    pub fn stepping(&self) -> bool {
        self.step_timer.is_some()
    }

    pub fn card_views_json(&self) -> String {
        serde_json::to_string(&self.shared.core.borrow().card_visuals()).unwrap_or_default()
    }

    pub fn chrome_json(&self) -> String {
        serde_json::to_string(&self.shared.core.borrow().chrome()).unwrap_or_default()
    }

    /// Stop both loops, drop listeners and release the physics world
    pub fn dispose(&mut self) {
        self.step_timer.take();
        self.shared.frame.borrow_mut().take();
        self.listeners.clear();
        self.shared.core.borrow_mut().teardown();
    }
}

impl BoardApp {
    fn install_listeners(&mut self) {
        let down = Rc::clone(&self.shared);
        let container = self.container.clone();
        self.listeners.push(EventListener::new(&self.container, "pointerdown", move |event| {
            if let Some((x, y)) = pointer_position(&container, event) {
                down.core.borrow_mut().pointer_down(x, y);
            }
        }));

        let moved = Rc::clone(&self.shared);
        let container = self.container.clone();
        self.listeners.push(EventListener::new(&self.container, "pointermove", move |event| {
            if let Some((x, y)) = pointer_position(&container, event) {
                moved.core.borrow_mut().pointer_move(x, y);
            }
        }));

        for name in ["pointerup", "pointerleave", "pointercancel"] {
            let up = Rc::clone(&self.shared);
            self.listeners.push(EventListener::new(&self.container, name, move |_| {
                up.core.borrow_mut().pointer_up();
            }));
        }
    }
}

impl Drop for BoardApp {
    fn drop(&mut self) {
        self.dispose();
    }
}
