use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::card::CardId;
use crate::domain::lifecycle::{BodyPose, CardPhase};
use crate::presentation::board_view::{board_chrome, BoardChrome};
use crate::presentation::card_view::{render_card, CardProps, CardSize, CardVisual};

use super::BoardCore;

/// One published pose mapping. Cards without a body (layout not known yet)
/// are absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub positions: BTreeMap<CardId, BodyPose>,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Live poses for settled/dragged cards, frozen poses for exiting ones.
fn current_poses(board: &BoardCore) -> BTreeMap<CardId, BodyPose> {
    let live = board.physics.positions();
    board
        .cards
        .iter()
        .filter_map(|entry| {
            let pose = match entry.phase {
                CardPhase::Deleting { frozen, .. } => frozen,
                _ => live.get(&entry.card.id).copied(),
            }?;
            Some((entry.card.id.clone(), pose))
        })
        .collect()
}

pub(super) fn sync_frame(board: &mut BoardCore) -> FrameSnapshot {
    board.frame += 1;
    FrameSnapshot {
        frame: board.frame,
        positions: current_poses(board),
    }
}

pub(super) fn card_props(board: &BoardCore) -> Vec<CardProps> {
    let poses = current_poses(board);
    board
        .cards
        .iter()
        .map(|entry| CardProps {
            id: entry.card.id.clone(),
            title: entry.card.title.clone(),
            description: entry.card.description.clone(),
            color_tag: entry.card.color_tag,
            physics_enabled: board.physics_active,
            position: poses.get(&entry.card.id).copied(),
            deleting: entry.phase.is_deleting(),
            dragging: entry.phase.is_dragging(),
        })
        .collect()
}

pub(super) fn card_visuals(board: &BoardCore) -> Vec<CardVisual> {
    let size = CardSize {
        width: board.config.card_width,
        height: board.config.card_height,
    };
    card_props(board).iter().map(|props| render_card(props, size)).collect()
}

pub(super) fn chrome(board: &BoardCore) -> BoardChrome {
    board_chrome(board.cards.len(), board.physics_active)
}
