use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::core::clock;
use crate::domain::card::IdGenerator;
use crate::domain::config::BoardConfig;
use crate::systems::physics::PhysicsAdapter;

use super::BoardCore;

/// Mixed into the seed so the adapter's velocity stream differs from the
/// board's spawn/colour stream.
const PHYSICS_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

pub(super) fn create_board_core(config: BoardConfig) -> BoardCore {
    let seed = config.seed.unwrap_or_else(|| clock::now_ms() as u64);
    BoardCore {
        physics: PhysicsAdapter::new(&config, seed ^ PHYSICS_SEED_SALT),
        rng: SmallRng::seed_from_u64(seed),
        config,
        cards: Vec::new(),
        physics_active: false,
        layout: None,
        ids: IdGenerator::new(),
        frame: 0,
    }
}
