//! Injectable randomness.
//!
//! Every roll in the engine goes through [`RandomSource`], so tests can pin
//! outcomes with [`ScriptedRng`] and simulations stay reproducible with
//! [`SimulationRng`].

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use rand::{rngs::StdRng, Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 42;

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `range`, derived from a single unit sample.
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        let (lo, hi) = range.into_inner();
        debug_assert!(lo <= hi, "empty roll range {lo}..={hi}");
        let width = hi - lo;
        let step = (self.next_unit() * (f64::from(width) + 1.0)).floor() as u32;
        lo + step.min(width)
    }

    /// Uniform offset in `[-half_width, +half_width)`.
    fn spread(&mut self, half_width: f64) -> f64 {
        (self.next_unit() - 0.5) * 2.0 * half_width
    }

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let last = u32::try_from(len - 1).unwrap_or(u32::MAX);
        Some(self.roll(0..=last) as usize)
    }
}

/// Seeded generator used for real play and statistical tests.
#[derive(Debug, Clone)]
pub struct SimulationRng {
    seed: u64,
    rng: StdRng,
}

impl SimulationRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SimulationRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for SimulationRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays queued samples; once drained it keeps returning the last one.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    queued: VecDeque<f64>,
    last: f64,
}

impl ScriptedRng {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        let mut rng = Self::default();
        rng.extend(samples);
        rng
    }

    pub fn push(&mut self, sample: f64) {
        self.queued.push_back(sample.clamp(0.0, 1.0 - f64::EPSILON));
    }

    pub fn extend(&mut self, samples: impl IntoIterator<Item = f64>) {
        for sample in samples {
            self.push(sample);
        }
    }

    pub fn remaining(&self) -> usize {
        self.queued.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        if let Some(sample) = self.queued.pop_front() {
            self.last = sample;
        }
        self.last
    }
}
