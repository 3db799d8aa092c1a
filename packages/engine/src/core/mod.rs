//! Core utilities shared by every layer: time, logging, errors.

pub mod clock;
pub mod error;
pub mod logging;

pub use error::{BoardError, BoardResult};
