//! Deterministic per-belt RNG.
//!
//! # Determinism strategy
//!
//! Each belt gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (source_endpoint * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive endpoint IDs uniformly across the seed space.
//! Belts never share RNG state, so the order in which belts are stepped does
//! not change the tags any belt assigns.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{EndpointId, TransitId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── BeltRng ───────────────────────────────────────────────────────────────────

/// Per-belt deterministic RNG, used to tag extracted items.
#[derive(Clone, Debug)]
pub struct BeltRng(SmallRng);

impl BeltRng {
    /// Seed deterministically from the run's global seed and the belt's
    /// source endpoint.
    pub fn new(global_seed: u64, source: EndpointId) -> Self {
        let seed = global_seed ^ (source.0 as u64).wrapping_mul(MIXING_CONSTANT);
        BeltRng(SmallRng::seed_from_u64(seed))
    }

    /// A fresh transit tag, uniform over the full `i16` range.
    #[inline]
    pub fn next_transit_id(&mut self) -> TransitId {
        TransitId(self.0.r#gen::<i16>())
    }

}
