use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::SimulationError;

/// Uniform [0, 1) draws driving the stochastic scheduling branches.
///
/// Schedulers never own a generator; they are handed one of these, so a
/// test can pin every probability check to the branch it wants.
pub trait DrawSource {
    fn next_draw(&mut self) -> Result<f64, SimulationError>;
}

/// Entropy-backed draws. Never fails.
pub struct EntropyDraws {
    rng: Box<dyn RngCore>,
}

impl EntropyDraws {
    pub fn new() -> Self {
        Self {
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Reproducible stream for replayable runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for EntropyDraws {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSource for EntropyDraws {
    fn next_draw(&mut self) -> Result<f64, SimulationError> {
        Ok(self.rng.gen())
    }
}

/// Constant draws; every probability check takes the same branch.
pub struct FixedDraws(pub f64);

impl DrawSource for FixedDraws {
    fn next_draw(&mut self) -> Result<f64, SimulationError> {
        Ok(self.0)
    }
}

/// Finite scripted draws, served in order. Exhaustion is an error, not
/// a silent fallback to entropy.
pub struct ScriptedDraws {
    draws: VecDeque<f64>,
}

impl ScriptedDraws {
    pub fn new(draws: Vec<f64>) -> Self {
        log::info!("Scripted draws initialized: {:?}", draws);
        Self {
            draws: draws.into(),
        }
    }
}

impl DrawSource for ScriptedDraws {
    fn next_draw(&mut self) -> Result<f64, SimulationError> {
        self.draws
            .pop_front()
            .ok_or(SimulationError::RandomSourceUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_draws_stay_in_unit_interval() {
        let mut draws = EntropyDraws::new();
        for _ in 0..100 {
            let value = draws.next_draw().unwrap();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn seeded_streams_are_reproducible() {
        let mut first = EntropyDraws::seeded(7);
        let mut second = EntropyDraws::seeded(7);
        for _ in 0..10 {
            assert_eq!(first.next_draw().unwrap(), second.next_draw().unwrap());
        }
    }

    #[test]
    fn fixed_draws_repeat_forever() {
        let mut draws = FixedDraws(0.25);
        assert_eq!(draws.next_draw().unwrap(), 0.25);
        assert_eq!(draws.next_draw().unwrap(), 0.25);
    }

    #[test]
    fn scripted_draws_serve_in_order_then_fail() {
        let mut draws = ScriptedDraws::new(vec![0.1, 0.9]);
        assert_eq!(draws.next_draw().unwrap(), 0.1);
        assert_eq!(draws.next_draw().unwrap(), 0.9);
        assert!(matches!(
            draws.next_draw(),
            Err(SimulationError::RandomSourceUnavailable)
        ));
    }
}
