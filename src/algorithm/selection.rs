//! Seeded randomness and weighted template selection
//!
//! All stochastic choices in generation go through one `RandomSelector` so a
//! seed reproduces the whole run, solver and repair walk included.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::cmp::Reverse;

use crate::algorithm::registry::{TemplateId, TemplateRegistry};

/// Exclusive upper bound of an acceptance draw
pub const ACCEPTANCE_RANGE: u8 = 100;

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
    seed: u64,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a selector from a freshly drawn seed
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Seed this selector was created with
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `0..ACCEPTANCE_RANGE`
    pub fn percent(&mut self) -> u8 {
        self.rng.random_range(0..ACCEPTANCE_RANGE)
    }

    /// Uniformly chosen element, `None` for an empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Pick one template by weighted acceptance
    ///
    /// Candidates are ordered by descending archetype weight (ties keep their
    /// incoming order). Each candidate in turn is accepted when a fresh draw
    /// in `0..100` is strictly below its weight, so a weight of `w` is
    /// accepted with probability `w / 100`. If every candidate is rejected
    /// the pick falls back to a uniform choice. Returns `None` only when
    /// `candidates` is empty.
    pub fn weighted_acceptance(
        &mut self,
        candidates: &[TemplateId],
        registry: &TemplateRegistry,
    ) -> Option<TemplateId> {
        let mut ordered = candidates.to_vec();
        ordered.sort_by_key(|&id| Reverse(registry.weight(id)));

        for &candidate in &ordered {
            if self.percent() < registry.weight(candidate) {
                return Some(candidate);
            }
        }

        self.choose(&ordered).copied()
    }
}
