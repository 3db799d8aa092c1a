//! Physics adapter - the only code that talks to `rapier2d`.
//!
//! Owns one rapier world holding four static walls plus one dynamic cuboid
//! per card, keyed by the card's id. Callers never see rapier handles:
//! they add/remove bodies by id, read poses back, flip gravity, and drive
//! the pointer grab.
//!
//! The world is stepped by whoever owns the fixed-rate timer; reading
//! positions never advances it.

mod adapter;
mod arena;
mod pointer;

pub use adapter::PhysicsAdapter;
pub use arena::{arena_walls, Wall};
