use std::fmt;

use serde::Serialize;

use crate::{format_duration, Departure, Minutes};

/// Accumulated statistics of a simulation.
///
/// All fields only grow. The areas are Riemann sums of the queue length and busy lane
/// occupancy, sampled at one-minute resolution.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Number of customers that departed.
    pub customers_served: usize,
    /// Area under the waiting queue length curve, Q(t).
    pub queue_area: u64,
    /// Area under the busy lane occupancy curve, B(t).
    pub busy_area: u64,
    /// Sum of `departure - service_start` over all served customers, in minutes.
    ///
    /// Note that this is the time spent from being placed in a lane to leaving, not the time
    /// spent in the waiting queue.
    pub total_wait_time: u64,
}

impl Statistics {
    /// Accounts for one minute with `queue_len` customers waiting and `busy` customers in the
    /// current lane.
    pub fn sample(&mut self, queue_len: usize, busy: usize, units: Minutes) {
        self.queue_area += queue_len as u64 * u64::from(units);
        self.busy_area += busy as u64 * u64::from(units);
    }

    /// Accounts for a served customer.
    pub fn record_departure(&mut self, departure: &Departure) {
        self.customers_served += 1;
        self.total_wait_time += u64::from(departure.wait());
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Customers served: {}", self.customers_served)?;
        writeln!(f, "Area under Q(t): {}", self.queue_area)?;
        writeln!(f, "Area under B(t): {}", self.busy_area)?;
        write!(
            f,
            "Total wait time: {}",
            format_duration(self.total_wait_time)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{CustomerId, Timestamp};

    #[test]
    fn test_accumulate() {
        let mut stats = Statistics::default();
        assert_eq!(stats, Statistics::default());
        stats.sample(3, 1, 1);
        stats.sample(0, 1, 1);
        stats.sample(2, 0, 4);
        assert_eq!(stats.queue_area, 11);
        assert_eq!(stats.busy_area, 2);
        stats.record_departure(&Departure {
            id: CustomerId::from(1),
            arrival: Timestamp::hm(8, 0),
            service_start: Timestamp::hm(8, 1),
            departure: Timestamp::hm(8, 31),
            service_time: 30,
        });
        assert_eq!(stats.customers_served, 1);
        assert_eq!(stats.total_wait_time, 30);
    }

    #[test]
    fn test_display() {
        let stats = Statistics {
            customers_served: 3,
            queue_area: 12,
            busy_area: 7,
            total_wait_time: 75,
        };
        assert_eq!(
            stats.to_string(),
            "Customers served: 3\nArea under Q(t): 12\nArea under B(t): 7\nTotal wait time: 1:15"
        );
    }
}
