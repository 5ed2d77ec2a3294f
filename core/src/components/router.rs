use crate::traits::{ClientId, Router, ServerId};
use rand::prelude::*;

/// Stateless uniform random routing over the whole pool.
pub struct RandomRouter {
    rng: StdRng,
}

impl RandomRouter {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Default for RandomRouter {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Router for RandomRouter {
    fn route(&mut self, _client: ClientId, server_count: usize) -> ServerId {
        self.rng.gen_range(0..server_count) as ServerId
    }
}
