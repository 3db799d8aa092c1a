//! Gravity Board Engine - physics-backed task board in WASM
//!
//! Cards live in an ordered list owned by the board controller; each card
//! has a parallel rigid body in a rapier world that supplies its position
//! and rotation.
//!
//! Layout:
//! - core/          - Clock, logging, errors
//! - domain/        - Cards, lifecycle, config
//! - systems/       - Physics adapter (rapier2d)
//! - simulation/    - Board controller + JS facade
//! - presentation/  - Card and board view descriptors
//! - runtime        - Browser timers and input (wasm32 only)

pub mod core;
pub mod domain;
pub mod presentation;
pub mod simulation;
pub mod systems;

#[cfg(target_arch = "wasm32")]
pub mod runtime;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook plus console logging at `level`
/// ("info" when omitted).
#[wasm_bindgen]
pub fn init(level: Option<String>) -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::init_logging(level.as_deref().unwrap_or("info"))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::error::{BoardError, BoardResult};
pub use domain::{BodyPose, BoardConfig, Card, CardId, CardPhase, ColorTag};
pub use presentation::card_view::{delete_intent, render_card, CardIntent, CardProps, CardVisual};
pub use simulation::{Board, BoardCore, FrameSnapshot};
pub use systems::physics::PhysicsAdapter;

#[cfg(target_arch = "wasm32")]
pub use runtime::BoardApp;
