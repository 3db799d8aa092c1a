use wasm_bindgen::prelude::*;

use crate::core::clock;
use crate::domain::card::CardId;
use crate::domain::config::BoardConfig;

use super::BoardCore;

/// JS handle to a board. Timing-sensitive calls read the wall clock; the
/// `*_at` variants take an explicit timestamp.
#[wasm_bindgen]
pub struct Board {
    core: BoardCore,
}

#[wasm_bindgen]
impl Board {
    /// Create a board with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: BoardCore::new(BoardConfig::default()),
        }
    }

    /// Create a board from a (partial) JSON config
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: String) -> Result<Board, JsValue> {
        let core = BoardCore::from_config_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn card_count(&self) -> usize {
        self.core.card_count()
    }

    #[wasm_bindgen(getter)]
    pub fn physics_active(&self) -> bool {
        self.core.physics_active()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    pub fn set_layout(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.core
            .set_layout(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Add a card; returns its id, or `undefined` for a blank title
    pub fn add_task(&mut self, title: &str) -> Option<String> {
        self.add_task_at(title, clock::now_ms())
    }

    pub fn add_task_at(&mut self, title: &str, now_ms: f64) -> Option<String> {
        self.core.add_task(title, now_ms).map(|id| id.to_string())
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        self.delete_task_at(id, clock::now_ms())
    }

    pub fn delete_task_at(&mut self, id: &str, now_ms: f64) -> bool {
        self.core.delete_task(&CardId::from(id), now_ms)
    }

    pub fn clear_board(&mut self, confirmed: bool) -> bool {
        self.clear_board_at(confirmed, clock::now_ms())
    }

    pub fn clear_board_at(&mut self, confirmed: bool, now_ms: f64) -> bool {
        self.core.clear_board(confirmed, now_ms)
    }

    /// Flip gravity; returns the new state
    pub fn toggle_physics(&mut self) -> bool {
        self.core.toggle_physics()
    }

    /// One fixed physics step
    pub fn step(&mut self) {
        self.core.step_physics();
    }

    /// Finish exit transitions that are due; returns how many cards went away
    pub fn advance(&mut self) -> usize {
        self.core.advance(clock::now_ms())
    }

    pub fn advance_to(&mut self, now_ms: f64) -> usize {
        self.core.advance(now_ms)
    }

    pub fn wants_frames(&self) -> bool {
        self.core.wants_frames()
    }

    /// Poll positions once; `{frame, positions: {id: {x, y, rotation}}}`
    pub fn sync_frame_json(&mut self) -> String {
        self.core.sync_frame().to_json()
    }

    pub fn cards_json(&self) -> String {
        let cards: Vec<_> = self.core.cards().collect();
        serde_json::to_string(&cards).unwrap_or_default()
    }

    pub fn card_views_json(&self) -> String {
        serde_json::to_string(&self.core.card_visuals()).unwrap_or_default()
    }

    pub fn chrome_json(&self) -> String {
        serde_json::to_string(&self.core.chrome()).unwrap_or_default()
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<String> {
        self.core.pointer_down(x, y).map(|id| id.to_string())
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) -> Option<String> {
        self.core.pointer_up().map(|id| id.to_string())
    }

    /// Release the physics world
    pub fn dispose(&mut self) {
        self.core.teardown();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn core(&self) -> &BoardCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut BoardCore {
        &mut self.core
    }
}
