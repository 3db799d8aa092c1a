use thiserror::Error;

/// Errors surfaced by the board. Everything else (blank titles, unknown ids,
/// unconfirmed clears) is a silent no-op.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid board config: {0}")]
    InvalidConfig(String),
    #[error("board config is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid layout {width}x{height}: dimensions must be positive and finite")]
    InvalidLayout { width: f32, height: f32 },
    #[error("layout {width}x{height} cannot hold a {card_width}x{card_height} card")]
    LayoutTooSmall {
        width: f32,
        height: f32,
        card_width: f32,
        card_height: f32,
    },
    #[error("a global tracing subscriber is already installed")]
    LoggerTaken,
}

pub type BoardResult<T> = Result<T, BoardError>;
