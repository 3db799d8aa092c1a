//! Board domain: cards, their lifecycle, and board configuration.

pub mod card;
pub mod config;
pub mod lifecycle;

pub use card::{Card, CardId, ColorTag, IdGenerator};
pub use config::BoardConfig;
pub use lifecycle::{BodyPose, CardPhase};
