use serde::Serialize;

pub const INPUT_PLACEHOLDER: &str = "Drop an idea...";
pub const EMPTY_TITLE: &str = "Your board is empty";
pub const EMPTY_HINT: &str = "Drop your first idea to get started";
pub const CLEAR_CONFIRM_PROMPT: &str = "Are you sure you want to clear the board?";

/// Header/footer state around the cards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardChrome {
    pub count_label: String,
    pub physics_active: bool,
    pub physics_label: &'static str,
    pub clear_enabled: bool,
    pub empty: bool,
    pub empty_title: &'static str,
    pub empty_hint: &'static str,
    pub input_placeholder: &'static str,
}

pub fn board_chrome(card_count: usize, physics_active: bool) -> BoardChrome {
    let noun = if card_count == 1 { "idea" } else { "ideas" };
    BoardChrome {
        count_label: format!("{card_count} {noun} on board"),
        physics_active,
        physics_label: if physics_active { "Physics Active" } else { "Physics Idle" },
        clear_enabled: card_count > 0,
        empty: card_count == 0,
        empty_title: EMPTY_TITLE,
        empty_hint: EMPTY_HINT,
        input_placeholder: INPUT_PLACEHOLDER,
    }
}
