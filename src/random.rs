//! Injectable randomness.
//!
//! Every random decision in the server (diagnosis pick, confidence score,
//! demo token) goes through [`RandomSource`], so tests can script exact
//! outputs with [`ScriptedRandom`] while production uses [`ThreadRandom`].

use parking_lot::Mutex;
use rand::Rng;
use std::collections::VecDeque;

/// Source of uniform random values.
pub trait RandomSource: Send + Sync + 'static {
    /// Returns a value uniformly distributed in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Returns a uniformly distributed 64-bit integer.
    fn next_u64(&self) -> u64;
}

/// Production source backed by the thread-local `rand` generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn next_u64(&self) -> u64 {
        rand::rng().random::<u64>()
    }
}

/// Deterministic source that replays a fixed script of values.
///
/// Unit values and integers are kept in separate queues. When a queue runs
/// dry it starts over from the beginning of its script.
#[derive(Debug)]
pub struct ScriptedRandom {
    units: Script<f64>,
    ints: Script<u64>,
}

#[derive(Debug)]
struct Script<T> {
    values: Vec<T>,
    pending: Mutex<VecDeque<T>>,
}

impl<T: Copy> Script<T> {
    fn new(values: Vec<T>) -> Self {
        Self {
            pending: Mutex::new(values.iter().copied().collect()),
            values,
        }
    }

    fn next(&self, fallback: T) -> T {
        let mut pending = self.pending.lock();
        if pending.is_empty() {
            pending.extend(self.values.iter().copied());
        }
        pending.pop_front().unwrap_or(fallback)
    }
}

impl ScriptedRandom {
    /// Creates a source replaying `units` for [`RandomSource::next_unit`].
    ///
    /// Values outside `[0, 1)` are clamped into range.
    pub fn new(units: impl IntoIterator<Item = f64>) -> Self {
        let units = units
            .into_iter()
            .map(|u| u.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self {
            units: Script::new(units),
            ints: Script::new(Vec::new()),
        }
    }

    /// Sets the integers replayed by [`RandomSource::next_u64`].
    #[must_use]
    pub fn with_ints(mut self, ints: impl IntoIterator<Item = u64>) -> Self {
        self.ints = Script::new(ints.into_iter().collect());
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        self.units.next(0.0)
    }

    fn next_u64(&self) -> u64 {
        self.ints.next(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_unit_range() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u), "out of range: {u}");
        }
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let rng = ScriptedRandom::new([0.1, 0.2, 0.3]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.2);
        assert_eq!(rng.next_unit(), 0.3);
        // wraps around
        assert_eq!(rng.next_unit(), 0.1);
    }

    #[test]
    fn test_scripted_clamps_values() {
        let rng = ScriptedRandom::new([-1.0, 2.0]);
        assert_eq!(rng.next_unit(), 0.0);
        assert!(rng.next_unit() < 1.0);
    }

    #[test]
    fn test_scripted_ints_independent_of_units() {
        let rng = ScriptedRandom::new([0.5]).with_ints([7, 9]);
        assert_eq!(rng.next_u64(), 7);
        assert_eq!(rng.next_unit(), 0.5);
        assert_eq!(rng.next_u64(), 9);
    }

    #[test]
    fn test_empty_script_falls_back_to_zero() {
        let rng = ScriptedRandom::new(std::iter::empty());
        assert_eq!(rng.next_unit(), 0.0);
        assert_eq!(rng.next_u64(), 0);
    }
}
