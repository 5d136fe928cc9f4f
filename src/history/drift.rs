//! Random sources for the perturbation applied to reconstructed values.
//!
//! The reconstructor asks for a unit shock in `[-0.5, 0.5]` per historical
//! day and scales it by the portfolio's volatility. Production callers use
//! [`RandomDrift`]; tests seed it or swap in [`NoDrift`].

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of per-day unit shocks.
pub trait Drift {
    /// Next shock, within `[-0.5, 0.5]`.
    fn unit_shock(&mut self) -> f64;
}

/// Uniform shocks drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDrift<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDrift<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDrift<ThreadRng> {
    /// Non-reproducible drift from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomDrift<StdRng> {
    /// Reproducible drift: the same seed yields the same curve.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Drift for RandomDrift<R> {
    fn unit_shock(&mut self) -> f64 {
        self.rng.gen_range(-0.5..=0.5)
    }
}

/// No perturbation at all; reconstructed values move only with trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDrift;

impl Drift for NoDrift {
    fn unit_shock(&mut self) -> f64 {
        0.0
    }
}

impl<D: Drift + ?Sized> Drift for &mut D {
    fn unit_shock(&mut self) -> f64 {
        (**self).unit_shock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shocks_are_bounded() {
        let mut drift = RandomDrift::seeded(7);
        for _ in 0..10_000 {
            let shock = drift.unit_shock();
            assert!((-0.5..=0.5).contains(&shock));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomDrift::seeded(42);
        let mut b = RandomDrift::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.unit_shock(), b.unit_shock());
        }
    }

    #[test]
    fn test_no_drift_is_zero() {
        let mut drift = NoDrift;
        assert_eq!(drift.unit_shock(), 0.0);
    }
}
