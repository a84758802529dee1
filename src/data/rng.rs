use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub const DEFAULT_SEED: u64 = 12345;

pub struct RngPlugin;
impl Plugin for RngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlobalRng>();
    }
}

/// Every random draw in the lattice goes through this generator. A configured
/// seed replays the same field; otherwise each launch draws a fresh one.
#[derive(Resource)]
pub struct GlobalRng {
    pub uniform: Pcg64Mcg,
}

impl GlobalRng {
    pub fn seeded(seed: u64) -> Self {
        GlobalRng {
            uniform: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        GlobalRng::seeded(rand::rng().random())
    }
}

impl Default for GlobalRng {
    fn default() -> Self {
        GlobalRng::seeded(DEFAULT_SEED)
    }
}
