//! Random rolls used by the state machine.
//!
//! Any `rand::Rng` is a `Dice`. Tests can substitute `ScriptedDice` to force
//! specific outcomes.

use std::collections::VecDeque;

use rand::Rng;

/// Source of uniform samples in [0, 1).
pub trait Dice {
    fn unit(&mut self) -> f64;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Fair coin: `1.0` or `-1.0`.
    fn sign(&mut self) -> f64 {
        if self.unit() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of samples, then repeats `fallback` forever.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    samples: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDice {
    pub fn new(samples: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            fallback,
        }
    }

    /// Every roll returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([], value)
    }
}

impl Dice for ScriptedDice {
    fn unit(&mut self) -> f64 {
        self.samples.pop_front().unwrap_or(self.fallback)
    }
}
