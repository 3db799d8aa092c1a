//! Card presentation.
//!
//! `render_card` is a pure function of [`CardProps`]: it decides the CSS
//! transform, class list and transition targets for one card. A card with
//! no position is not physics-tracked yet and keeps its flow layout.

use serde::Serialize;

use crate::domain::card::{CardId, ColorTag};
use crate::domain::lifecycle::BodyPose;

pub const EXIT_DURATION_MS: f64 = 1000.0;
pub const DELETE_LABEL: &str = "Delete card";

const BASE_CLASSES: &str = "glassmorphic rounded-xl p-6 w-72 card-shadow group";
const DRAG_Z_INDEX: i32 = 40;
const REST_Z_INDEX: i32 = 1;

/// Everything the rendering layer knows about one card.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProps {
    pub id: CardId,
    pub title: String,
    pub description: String,
    pub color_tag: ColorTag,
    pub physics_enabled: bool,
    pub position: Option<BodyPose>,
    pub deleting: bool,
    pub dragging: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardSize {
    pub width: f32,
    pub height: f32,
}

/// Opacity/scale/offset/blur at one end of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionState {
    pub opacity: f32,
    pub scale: f32,
    pub offset_y: f32,
    pub blur_px: f32,
}

pub const ENTER_FROM: MotionState = MotionState {
    opacity: 0.0,
    scale: 0.8,
    offset_y: -50.0,
    blur_px: 0.0,
};

pub const SETTLED: MotionState = MotionState {
    opacity: 1.0,
    scale: 1.0,
    offset_y: 0.0,
    blur_px: 0.0,
};

pub const EXIT_TO: MotionState = MotionState {
    opacity: 0.0,
    scale: 0.0,
    offset_y: 0.0,
    blur_px: 10.0,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMotion {
    pub initial: MotionState,
    pub animate: MotionState,
    pub exit: MotionState,
    pub exit_duration_ms: f64,
    /// True once the card should play its exit transition.
    pub exiting: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVisual {
    pub id: CardId,
    pub title: String,
    pub description: String,
    /// `None` until the card is physics-tracked.
    pub transform: Option<String>,
    pub class_name: String,
    pub accent: &'static str,
    pub z_index: i32,
    pub cursor: &'static str,
    pub motion: CardMotion,
    pub delete_label: &'static str,
}

/// What a card asks the board to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardIntent {
    Delete(CardId),
}

pub fn render_card(props: &CardProps, size: CardSize) -> CardVisual {
    let transform = props.position.map(|pose| {
        format!(
            "translate({:.2}px, {:.2}px) rotate({:.4}rad)",
            pose.x - size.width / 2.0,
            pose.y - size.height / 2.0,
            pose.rotation
        )
    });

    let mut class_name = format!("{BASE_CLASSES} {}", props.color_tag.glow_class());
    if props.physics_enabled {
        class_name.push_str(" floating-animation");
    }
    if props.dragging {
        class_name.push_str(" dragging");
    }
    if props.deleting {
        class_name.push_str(" pointer-events-none");
    }

    CardVisual {
        id: props.id.clone(),
        title: props.title.clone(),
        description: props.description.clone(),
        transform,
        class_name,
        accent: props.color_tag.accent(),
        z_index: if props.dragging { DRAG_Z_INDEX } else { REST_Z_INDEX },
        cursor: if props.dragging { "grabbing" } else { "grab" },
        motion: CardMotion {
            initial: ENTER_FROM,
            animate: if props.deleting { EXIT_TO } else { SETTLED },
            exit: EXIT_TO,
            exit_duration_ms: EXIT_DURATION_MS,
            exiting: props.deleting,
        },
        delete_label: DELETE_LABEL,
    }
}

/// The delete button's action.
pub fn delete_intent(props: &CardProps) -> CardIntent {
    CardIntent::Delete(props.id.clone())
}
