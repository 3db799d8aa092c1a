//! Systems that sit behind the board controller.

pub mod physics;
