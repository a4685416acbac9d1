//! Deterministic distributions for testing the checkout simulation.

#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::cell::Cell;

use rand::distributions::Distribution;

/// This distribution produces values between `low` and `low + span - 1` by requesting the
/// `next_u32` from the random number generator and applying `mod span` on it.
///
/// This is meant for testing, e.g., together with `rand::rngs::mock::StepRng` it can produce
/// predictable values that can be used in unit tests.
pub struct WrappingEchoDistribution {
    low: u32,
    span: u32,
}

impl WrappingEchoDistribution {
    /// Constructs a new distribution generating values in the inclusive range `low..=high`.
    ///
    /// # Panics
    ///
    /// Panics if `low > high`.
    #[must_use]
    pub fn new(low: u32, high: u32) -> Self {
        assert!(low <= high, "empty range: {}..={}", low, high);
        Self {
            low,
            span: high - low + 1,
        }
    }
}

impl Distribution<u32> for WrappingEchoDistribution {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.low + rng.next_u32() % self.span
    }
}

/// Replays a fixed list of values, in order, and starts over once exhausted.
///
/// The random number generator is never consulted, so the values drawn do not depend on how
/// many other draws were made from the same stream.
pub struct SequenceDistribution<T> {
    values: Vec<T>,
    position: Cell<usize>,
}

impl<T> SequenceDistribution<T> {
    /// Constructs a distribution cycling through `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "sequence must not be empty");
        Self {
            values,
            position: Cell::new(0),
        }
    }

    /// Constructs a distribution always returning `value`.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self::new(vec![value])
    }
}

impl<T: Copy> Distribution<T> for SequenceDistribution<T> {
    fn sample<R: rand::Rng + ?Sized>(&self, _: &mut R) -> T {
        let position = self.position.get();
        self.position.set((position + 1) % self.values.len());
        self.values[position]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_wrapping_echo() {
        let mut rng = StepRng::new(0, 1);
        let dist = WrappingEchoDistribution::new(10, 12);
        let values: Vec<u32> = (0..5).map(|_| dist.sample(&mut rng)).collect();
        assert_eq!(values, vec![10, 11, 12, 10, 11]);
    }

    #[test]
    fn test_sequence() {
        let mut rng = StepRng::new(0, 1);
        let dist = SequenceDistribution::new(vec![3_u32, 1, 2]);
        let values: Vec<u32> = (0..7).map(|_| dist.sample(&mut rng)).collect();
        assert_eq!(values, vec![3, 1, 2, 3, 1, 2, 3]);
    }
}
