//! Board controller.
//!
//! `BoardCore` owns the ordered card list and the physics adapter, and is
//! the only place where the two are kept in step:
//! - add: card appended, body registered once the layout is known
//! - delete/clear: card marked deleting, card + body dropped by `advance`
//! - frame sync: positions polled from the adapter, never pushed
//!
//! Time is always passed in (`now_ms`) so the controller can be driven by
//! the browser timers or by tests alike.

use rand::rngs::SmallRng;

use crate::core::error::BoardResult;
use crate::domain::card::{Card, CardId, IdGenerator};
use crate::domain::config::BoardConfig;
use crate::domain::lifecycle::CardPhase;
use crate::presentation::board_view::BoardChrome;
use crate::presentation::card_view::{CardIntent, CardProps, CardVisual};
use crate::systems::physics::PhysicsAdapter;

#[path = "commands/commands.rs"]
mod commands;
#[path = "pointer/pointer.rs"]
mod pointer;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

pub use facade::Board;
pub use render_extract::FrameSnapshot;

/// A card plus where it is in its lifecycle.
#[derive(Clone, Debug)]
pub struct CardEntry {
    pub card: Card,
    pub phase: CardPhase,
}

/// The board: cards, physics, and transient UI state.
pub struct BoardCore {
    config: BoardConfig,
    cards: Vec<CardEntry>,
    physics: PhysicsAdapter,
    physics_active: bool,
    layout: Option<(f32, f32)>,
    ids: IdGenerator,
    rng: SmallRng,
    frame: u64,
}

impl BoardCore {
    /// Create a board with the given configuration (already validated).
    pub fn new(config: BoardConfig) -> Self {
        init::create_board_core(config)
    }

    pub fn from_config_json(json: &str) -> BoardResult<Self> {
        Ok(Self::new(BoardConfig::from_json(json)?))
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards in display order, including those playing their exit transition.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().map(|e| &e.card)
    }

    pub fn entries(&self) -> &[CardEntry] {
        &self.cards
    }

    pub fn card(&self, id: &CardId) -> Option<&CardEntry> {
        self.cards.iter().find(|e| &e.card.id == id)
    }

    pub fn physics(&self) -> &PhysicsAdapter {
        &self.physics
    }

    pub fn physics_active(&self) -> bool {
        self.physics_active
    }

    pub fn layout(&self) -> Option<(f32, f32)> {
        self.layout
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Id of the card held by the pointer, if any.
    pub fn dragging_id(&self) -> Option<&CardId> {
        self.cards.iter().find(|e| e.phase.is_dragging()).map(|e| &e.card.id)
    }

    /// Ids of cards playing their exit transition.
    pub fn deleting_ids(&self) -> Vec<&CardId> {
        self.cards
            .iter()
            .filter(|e| e.phase.is_deleting())
            .map(|e| &e.card.id)
            .collect()
    }

    // === CARD COMMANDS ===

    /// Add a card titled `title`. Blank titles are ignored.
    pub fn add_task(&mut self, title: &str, now_ms: f64) -> Option<CardId> {
        commands::add_task(self, title, now_ms)
    }

    /// Start deleting a card; it disappears after the exit delay.
    pub fn delete_task(&mut self, id: &CardId, now_ms: f64) -> bool {
        commands::delete_task(self, id, now_ms)
    }

    /// Start deleting every card, but only when `confirmed`.
    pub fn clear_board(&mut self, confirmed: bool, now_ms: f64) -> bool {
        commands::clear_board(self, confirmed, now_ms)
    }

    pub fn handle_intent(&mut self, intent: CardIntent, now_ms: f64) -> bool {
        match intent {
            CardIntent::Delete(id) => self.delete_task(&id, now_ms),
        }
    }

    // === SETTINGS ===

    /// Flip gravity/floating mode. Returns the new state.
    pub fn toggle_physics(&mut self) -> bool {
        settings::toggle_physics(self)
    }

    pub fn set_physics_active(&mut self, active: bool) {
        settings::set_physics_active(self, active)
    }

    /// Record the container size, (re)build the arena, and register bodies
    /// for every card that has none yet.
    pub fn set_layout(&mut self, width: f32, height: f32) -> BoardResult<()> {
        settings::set_layout(self, width, height)
    }

    // === POINTER ===

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<CardId> {
        pointer::pointer_down(self, x, y)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        pointer::pointer_move(self, x, y)
    }

    pub fn pointer_up(&mut self) -> Option<CardId> {
        pointer::pointer_up(self)
    }

    // === TIME ===

    /// One fixed physics step.
    pub fn step_physics(&mut self) {
        step::step_physics(self)
    }

    /// Drop cards whose exit transition has finished. Returns how many.
    pub fn advance(&mut self, now_ms: f64) -> usize {
        step::advance(self, now_ms)
    }

    /// Whether the animation-frame loop should keep running.
    pub fn wants_frames(&self) -> bool {
        !self.cards.is_empty()
    }

    // === RENDER ===

    /// Poll the adapter once and publish the pose mapping.
    pub fn sync_frame(&mut self) -> FrameSnapshot {
        render_extract::sync_frame(self)
    }

    pub fn card_props(&self) -> Vec<CardProps> {
        render_extract::card_props(self)
    }

    pub fn card_visuals(&self) -> Vec<CardVisual> {
        render_extract::card_visuals(self)
    }

    pub fn chrome(&self) -> BoardChrome {
        render_extract::chrome(self)
    }

    /// Release the physics world. Cards survive; bodies come back on the
    /// next `set_layout`.
    pub fn teardown(&mut self) {
        settings::teardown(self)
    }
}
