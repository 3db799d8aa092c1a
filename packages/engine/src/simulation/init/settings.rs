use tracing::{debug, info};

use crate::core::error::{BoardError, BoardResult};
use crate::domain::lifecycle::CardPhase;

use super::commands::register_body;
use super::BoardCore;

pub(super) fn toggle_physics(board: &mut BoardCore) -> bool {
    let active = !board.physics_active;
    set_physics_active(board, active);
    active
}

pub(super) fn set_physics_active(board: &mut BoardCore, active: bool) {
    board.physics_active = active;
    board.physics.set_gravity_enabled(active);
    debug!("physics {}", if active { "active" } else { "idle" });
}

pub(super) fn set_layout(board: &mut BoardCore, width: f32, height: f32) -> BoardResult<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(BoardError::InvalidLayout { width, height });
    }
    let (card_width, card_height) = (board.config.card_width, board.config.card_height);
    if width < card_width || height < card_height {
        return Err(BoardError::LayoutTooSmall {
            width,
            height,
            card_width,
            card_height,
        });
    }

    board.layout = Some((width, height));
    board.physics.initialize(width, height);

    // A fresh world has no grab, so nothing can still be dragging.
    for idx in 0..board.cards.len() {
        let entry = &mut board.cards[idx];
        if entry.phase.is_dragging() {
            entry.phase = CardPhase::Resting;
        }
        if entry.phase.is_deleting() {
            continue;
        }
        let id = entry.card.id.clone();
        register_body(board, &id);
    }

    info!(
        "layout {width}x{height}: {} card bodies registered",
        board.physics.body_count()
    );
    Ok(())
}

pub(super) fn teardown(board: &mut BoardCore) {
    board.physics.teardown();
    board.layout = None;
    for entry in board.cards.iter_mut() {
        if entry.phase.is_dragging() {
            entry.phase = CardPhase::Resting;
        }
    }
}
