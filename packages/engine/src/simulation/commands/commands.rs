use tracing::debug;
use rand::Rng;

use crate::domain::card::{Card, CardId, ColorTag};
use crate::domain::lifecycle::CardPhase;

use super::{BoardCore, CardEntry};

/// Fraction of the container height (from the top) that new cards spawn in.
const SPAWN_BAND: f32 = 0.4;

pub(super) fn add_task(board: &mut BoardCore, title: &str, now_ms: f64) -> Option<CardId> {
    if title.trim().is_empty() {
        return None;
    }

    let id = board.ids.next_id(now_ms);
    let color_tag = ColorTag::random(&mut board.rng);
    let card = Card::new(id.clone(), title, color_tag, now_ms);
    board.cards.push(CardEntry {
        card,
        phase: CardPhase::Resting,
    });
    register_body(board, &id);

    debug!("card {id} added ({} on board)", board.cards.len());
    Some(id)
}

/// Register a body for `id` at a random spot in the upper part of the
/// container. Nothing happens until the layout is known.
pub(super) fn register_body(board: &mut BoardCore, id: &CardId) {
    let Some((width, height)) = board.layout else {
        return;
    };
    let w = board.config.card_width;
    let h = board.config.card_height;
    let x = random_between(&mut board.rng, w / 2.0, width - w / 2.0);
    let y = random_between(&mut board.rng, h / 2.0, (height * SPAWN_BAND).max(h / 2.0));
    board.physics.add_body(id, x, y, w, h);
}

fn random_between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

pub(super) fn delete_task(board: &mut BoardCore, id: &CardId, now_ms: f64) -> bool {
    let remove_at_ms = now_ms + board.config.exit_delay_ms;
    let frozen = board.physics.positions().get(id).copied();

    let Some(entry) = board.cards.iter_mut().find(|e| &e.card.id == id) else {
        return false;
    };
    let was_dragging = entry.phase.is_dragging();
    if !entry.phase.begin_delete(remove_at_ms, frozen) {
        return false;
    }
    if was_dragging {
        board.physics.pointer_up();
    }

    debug!("card {id} deleting, removal at {remove_at_ms:.0}");
    true
}

pub(super) fn clear_board(board: &mut BoardCore, confirmed: bool, now_ms: f64) -> bool {
    if !confirmed || board.cards.is_empty() {
        return false;
    }

    let remove_at_ms = now_ms + board.config.exit_delay_ms;
    let positions = board.physics.positions();
    let mut marked = 0usize;
    for entry in board.cards.iter_mut() {
        let frozen = positions.get(&entry.card.id).copied();
        if entry.phase.begin_delete(remove_at_ms, frozen) {
            marked += 1;
        }
    }
    board.physics.pointer_up();

    debug!("board clear: {marked} cards deleting");
    true
}
