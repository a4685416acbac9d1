use crate::{Minutes, Timestamp};

/// Simulation clock.
///
/// The clock only moves forward, and only through [`Clock::advance`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Clock {
    time: Timestamp,
}

impl Clock {
    /// Constructs a clock showing `time`.
    #[must_use]
    pub fn new(time: Timestamp) -> Self {
        Self { time }
    }

    /// Current simulation time.
    #[must_use]
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// Moves the clock `units` minutes forward.
    pub fn advance(&mut self, units: Minutes) {
        self.time = self.time.plus(units);
    }

    /// Moves the clock forward to `time` and returns the number of minutes that passed.
    ///
    /// # Panics
    ///
    /// Panics if `time` is earlier than the current time.
    pub fn advance_to(&mut self, time: Timestamp) -> Minutes {
        let units = time.since(self.time).unwrap_or_else(|| {
            panic!(
                "clock cannot move backwards from {} to {}",
                self.time, time
            )
        });
        self.advance(units);
        units
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_advance() {
        let mut clock = Clock::default();
        assert_eq!(clock.time(), Timestamp::MIDNIGHT);
        clock.advance(1);
        assert_eq!(clock.time(), Timestamp::hm(0, 1));
        clock.advance(0);
        assert_eq!(clock.time(), Timestamp::hm(0, 1));
        assert_eq!(clock.advance_to(Timestamp::hm(8, 0)), 479);
        assert_eq!(clock.time(), Timestamp::hm(8, 0));
        assert_eq!(clock.advance_to(Timestamp::hm(8, 0)), 0);
    }

    #[test]
    #[should_panic(expected = "clock cannot move backwards")]
    fn test_advance_backwards() {
        let mut clock = Clock::new(Timestamp::hm(8, 0));
        clock.advance_to(Timestamp::hm(7, 59));
    }
}
