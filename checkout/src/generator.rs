use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{Customer, CustomerId, Minutes, Timestamp};

/// Generates arriving customers.
///
/// Consecutive arrivals are separated by a gap drawn from the gap distribution, and customers
/// are numbered with a counter owned by the generator, so IDs are never repeated within one
/// generator's lifetime.
pub struct ArrivalGenerator<D = Uniform<Minutes>> {
    gap_dist: D,
    next_id: usize,
}

impl ArrivalGenerator {
    /// Arrival gaps drawn uniformly from `1..=max_gap`.
    ///
    /// # Panics
    ///
    /// Panics if `max_gap` is 0.
    #[must_use]
    pub fn uniform(max_gap: Minutes) -> Self {
        assert!(max_gap > 0, "maximum arrival gap must be positive");
        Self::new(Uniform::new_inclusive(1, max_gap))
    }
}

impl<D: Distribution<Minutes>> ArrivalGenerator<D> {
    /// Constructs a generator with the given gap distribution. The first ID is 1.
    #[must_use]
    pub fn new(gap_dist: D) -> Self {
        Self {
            gap_dist,
            next_id: 1,
        }
    }

    /// The ID that will be assigned to the next generated customer.
    #[must_use]
    pub fn next_id(&self) -> CustomerId {
        CustomerId::from(self.next_id)
    }

    /// Generates `count` customers. The first one arrives at `first_arrival`; a gap is drawn
    /// after each customer.
    ///
    /// # Panics
    ///
    /// Panics if the distribution yields a zero gap.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        first_arrival: Timestamp,
        count: usize,
    ) -> Vec<Customer> {
        let mut arrival = first_arrival;
        (0..count)
            .map(|_| {
                let customer = Customer::new(CustomerId::from(self.next_id), arrival);
                self.next_id += 1;
                let gap = self.gap_dist.sample(&mut *rng);
                assert!(gap > 0, "arrival gap must be positive");
                arrival = arrival.plus(gap);
                customer
            })
            .collect()
    }
}

/// Draws service durations.
pub struct ServiceTimeGenerator<D = Uniform<Minutes>> {
    dist: D,
}

impl ServiceTimeGenerator {
    /// Service durations drawn uniformly from `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn uniform(min: Minutes, max: Minutes) -> Self {
        assert!(min <= max, "empty service time range {}..={}", min, max);
        Self::new(Uniform::new_inclusive(min, max))
    }
}

impl<D: Distribution<Minutes>> ServiceTimeGenerator<D> {
    /// Constructs a generator with the given service time distribution.
    #[must_use]
    pub fn new(dist: D) -> Self {
        Self { dist }
    }

    /// Draws the duration of one service episode.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Minutes {
        self.dist.sample(rng)
    }
}
