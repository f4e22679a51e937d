// src/core/intervals.rs — Weighted interval sampling

use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::infra::errors::WozEvalError;

/// Draws sample indices with replacement, proportionally to the given
/// weights. Seams out the randomness so deterministic fakes can stand
/// in during tests.
pub trait IntervalSampler {
    fn draw_indices(&mut self, weights: &[f64], count: usize) -> Result<Vec<usize>, WozEvalError>;
}

/// Interval sampler backed by a cumulative weight table and a ChaCha
/// generator. Seeded construction makes whole resampling passes
/// reproducible.
#[derive(Debug, Clone)]
pub struct WeightedIntervals {
    rng: ChaCha8Rng,
}

impl WeightedIntervals {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for WeightedIntervals {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalSampler for WeightedIntervals {
    fn draw_indices(&mut self, weights: &[f64], count: usize) -> Result<Vec<usize>, WozEvalError> {
        let intervals = WeightedIndex::new(weights).map_err(|e| {
            WozEvalError::DegenerateWeight(format!("interval construction failed: {e}"))
        })?;
        Ok((0..count).map(|_| intervals.sample(&mut self.rng)).collect())
    }
}
