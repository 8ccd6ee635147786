// src/engine/identity.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of resource identities.
///
/// One instance is created per process and handed to the
/// [`Reconciler`](super::Reconciler). Ids are random non-negative integers
/// rendered as decimal strings; collisions are unlikely, not impossible. The
/// host is the one that stores them durably.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Generator seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator, for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_id(&mut self) -> String {
        // Keep ids within i64 range so hosts that parse them as signed ints
        // never see a negative number.
        let n = self.rng.random::<u64>() >> 1;
        n.to_string()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
