//! Presentation descriptors handed to the rendering layer.
//!
//! Nothing here mutates board state: functions take plain props and return
//! plain data (serialized to JSON at the wasm boundary).

pub mod board_view;
pub mod card_view;
