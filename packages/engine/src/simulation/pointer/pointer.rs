use crate::domain::card::CardId;
use crate::domain::lifecycle::CardPhase;

use super::BoardCore;

pub(super) fn pointer_down(board: &mut BoardCore, x: f32, y: f32) -> Option<CardId> {
    let id = board.physics.pointer_down(x, y)?;
    match board.cards.iter_mut().find(|e| e.card.id == id) {
        Some(entry) if !entry.phase.is_deleting() => {
            entry.phase = CardPhase::Dragging;
            Some(id)
        }
        // Exiting cards can't be picked up.
        _ => {
            board.physics.pointer_up();
            None
        }
    }
}

pub(super) fn pointer_move(board: &mut BoardCore, x: f32, y: f32) {
    board.physics.pointer_move(x, y);
}

pub(super) fn pointer_up(board: &mut BoardCore) -> Option<CardId> {
    let id = board.physics.pointer_up()?;
    if let Some(entry) = board.cards.iter_mut().find(|e| e.card.id == id) {
        if entry.phase.is_dragging() {
            entry.phase = CardPhase::Resting;
        }
    }
    Some(id)
}
