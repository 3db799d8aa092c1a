use tracing::{debug, trace};

use crate::core::clock::StepTimer;
use crate::domain::card::CardId;

use super::BoardCore;

pub(super) fn step_physics(board: &mut BoardCore) {
    if !board.physics.is_initialized() {
        return;
    }
    let timer = StepTimer::start();
    board.physics.step();
    trace!(
        "physics step {} took {:.3} ms",
        board.physics.step_count(),
        timer.elapsed_ms()
    );
}

pub(super) fn advance(board: &mut BoardCore, now_ms: f64) -> usize {
    let due: Vec<CardId> = board
        .cards
        .iter()
        .filter(|e| e.phase.is_due(now_ms))
        .map(|e| e.card.id.clone())
        .collect();
    if due.is_empty() {
        return 0;
    }

    board.cards.retain(|e| !e.phase.is_due(now_ms));
    for id in due.iter() {
        board.physics.remove_body(id);
    }

    debug!("{} cards removed ({} left)", due.len(), board.cards.len());
    due.len()
}
