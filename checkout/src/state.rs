use std::collections::VecDeque;

use crate::{Clock, Customer, Departure, LogEntry, Minutes, Statistics, Timestamp};

/// A server lane: the customers placed in it, and the time it was last put into service.
///
/// Service durations of a lane's customers are counted from its origin: the first customer
/// finishes `d` minutes after the origin, the next one `d'` minutes after that, and so on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServerLane {
    customers: VecDeque<Customer>,
    origin: Timestamp,
}

impl ServerLane {
    /// Customers in the lane, in service order.
    #[must_use]
    pub fn customers(&self) -> &VecDeque<Customer> {
        &self.customers
    }

    /// Number of customers in the lane.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether the lane holds no customers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// The time the lane was last put into service.
    #[must_use]
    pub fn origin(&self) -> Timestamp {
        self.origin
    }
}

/// The current and the next server lanes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Lanes {
    current: ServerLane,
    next: ServerLane,
}

impl Lanes {
    /// The lane being served.
    #[must_use]
    pub fn current(&self) -> &ServerLane {
        &self.current
    }

    /// The lane receiving redirected customers.
    #[must_use]
    pub fn next(&self) -> &ServerLane {
        &self.next
    }

    /// Exchanges the current and next lanes; the new current lane is put into service at `time`.
    pub fn swap(&mut self, time: Timestamp) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.current.origin = time;
    }
}

/// Waiting queue, server lanes, clock, and statistics of a single simulation.
///
/// Every customer is in exactly one of the waiting queue, the current lane, or the next lane,
/// until it departs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationState {
    queue: VecDeque<Customer>,
    lanes: Lanes,
    clock: Clock,
    statistics: Statistics,
}

impl SimulationState {
    /// Constructs an empty state with the clock at `time`.
    #[must_use]
    pub fn new(time: Timestamp) -> Self {
        Self {
            clock: Clock::new(time),
            ..Self::default()
        }
    }

    /// Current simulation time.
    #[must_use]
    pub fn time(&self) -> Timestamp {
        self.clock.time()
    }

    /// Customers in the waiting queue, in arrival order.
    #[must_use]
    pub fn waiting(&self) -> &VecDeque<Customer> {
        &self.queue
    }

    /// Both server lanes.
    #[must_use]
    pub fn lanes(&self) -> &Lanes {
        &self.lanes
    }

    /// Statistics accumulated so far.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Whether nobody is waiting or being served.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.lanes.current.is_empty() && self.lanes.next.is_empty()
    }

    /// Appends customers at the end of the waiting queue.
    pub fn enqueue<I: IntoIterator<Item = Customer>>(&mut self, customers: I) {
        self.queue.extend(customers);
    }

    /// Serves every customer in the current lane, one after another, drawing the duration of
    /// each service from `service_time`. The clock moves to the last departure.
    pub fn drain_current<F>(&mut self, mut service_time: F) -> Vec<Departure>
    where
        F: FnMut() -> Minutes,
    {
        let mut start = self.lanes.current.origin;
        let mut departures = Vec::with_capacity(self.lanes.current.len());
        while let Some(customer) = self.lanes.current.customers.pop_front() {
            let duration = service_time();
            let time = start.plus(duration);
            self.clock.advance_to(time);
            let departure = customer.depart(time, duration);
            self.statistics.record_departure(&departure);
            departures.push(departure);
            start = time;
        }
        departures
    }

    /// Moves the head of the waiting queue to the current lane, if the lane is free.
    ///
    /// If the head has not arrived yet, the lane stays idle until it does, and the clock moves
    /// to its arrival first.
    pub fn admit(&mut self) -> Option<LogEntry> {
        if !self.lanes.current.is_empty() {
            return None;
        }
        let mut customer = self.queue.pop_front()?;
        if customer.arrival() > self.clock.time() {
            self.clock.advance_to(customer.arrival());
        }
        let time = self.clock.time();
        customer.start_service(time);
        let entry = LogEntry::Admitted {
            id: customer.id(),
            arrival: customer.arrival(),
            service_start: time,
        };
        self.lanes.current.origin = time;
        self.lanes.current.customers.push_back(customer);
        Some(entry)
    }

    /// Moves every customer that has been waiting for at least `threshold` minutes to the next
    /// lane, keeping their relative order.
    pub fn redirect_overdue(&mut self, threshold: Minutes) -> Vec<LogEntry> {
        let time = self.clock.time();
        let (overdue, waiting): (VecDeque<_>, VecDeque<_>) = self
            .queue
            .drain(..)
            .partition(|c| c.waiting_at(time).map_or(false, |w| w >= threshold));
        self.queue = waiting;
        overdue
            .into_iter()
            .map(|mut customer| {
                customer.start_service(time);
                let entry = LogEntry::Redirected {
                    id: customer.id(),
                    arrival: customer.arrival(),
                    time,
                };
                self.lanes.next.customers.push_back(customer);
                entry
            })
            .collect()
    }

    /// Swaps the lanes if anyone is waiting in the next lane. Returns whether it did.
    pub fn swap_lanes(&mut self) -> bool {
        if self.lanes.next.is_empty() {
            false
        } else {
            self.lanes.swap(self.clock.time());
            true
        }
    }

    /// Accounts for one minute of the queue and current lane occupancy and moves the clock,
    /// unless both are empty. Returns whether the clock moved.
    pub fn tick(&mut self) -> bool {
        if self.queue.is_empty() && self.lanes.current.is_empty() {
            return false;
        }
        self.statistics
            .sample(self.queue.len(), self.lanes.current.len(), 1);
        self.clock.advance(1);
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CustomerId;
    use rstest::{fixture, rstest};

    fn customer(id: usize, arrival: Timestamp) -> Customer {
        Customer::new(CustomerId::from(id), arrival)
    }

    fn ids(customers: &VecDeque<Customer>) -> Vec<usize> {
        customers.iter().map(|c| usize::from(c.id())).collect()
    }

    #[fixture]
    fn state() -> SimulationState {
        let mut state = SimulationState::default();
        state.enqueue(vec![
            customer(1, Timestamp::hm(8, 0)),
            customer(2, Timestamp::hm(8, 2)),
            customer(3, Timestamp::hm(8, 3)),
        ]);
        state
    }

    #[rstest]
    fn test_admit_waits_for_arrival(mut state: SimulationState) {
        assert_eq!(state.time(), Timestamp::MIDNIGHT);
        let entry = state.admit();
        assert_eq!(
            entry,
            Some(LogEntry::Admitted {
                id: CustomerId::from(1),
                arrival: Timestamp::hm(8, 0),
                service_start: Timestamp::hm(8, 0),
            })
        );
        assert_eq!(state.time(), Timestamp::hm(8, 0));
        assert_eq!(ids(state.lanes().current().customers()), vec![1]);
        assert_eq!(state.lanes().current().origin(), Timestamp::hm(8, 0));
        assert_eq!(ids(state.waiting()), vec![2, 3]);
        // Lane is taken.
        assert_eq!(state.admit(), None);
    }

    #[rstest]
    fn test_drain(mut state: SimulationState) {
        state.admit();
        assert!(state.tick());
        assert_eq!(state.time(), Timestamp::hm(8, 1));
        let mut durations = vec![10].into_iter();
        let departures = state.drain_current(|| durations.next().unwrap());
        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].service_start, Timestamp::hm(8, 0));
        assert_eq!(departures[0].departure, Timestamp::hm(8, 10));
        assert_eq!(state.time(), Timestamp::hm(8, 10));
        assert!(state.lanes().current().is_empty());
        let stats = state.statistics();
        assert_eq!(stats.customers_served, 1);
        assert_eq!(stats.total_wait_time, 10);
        assert_eq!(stats.queue_area, 2);
        assert_eq!(stats.busy_area, 1);
    }

    #[rstest]
    fn test_redirect_overdue(mut state: SimulationState) {
        state.admit();
        state.clock.advance_to(Timestamp::hm(8, 47));
        let entries = state.redirect_overdue(45);
        assert_eq!(
            entries,
            vec![LogEntry::Redirected {
                id: CustomerId::from(2),
                arrival: Timestamp::hm(8, 2),
                time: Timestamp::hm(8, 47),
            }]
        );
        assert_eq!(ids(state.waiting()), vec![3]);
        assert_eq!(ids(state.lanes().next().customers()), vec![2]);
        assert_eq!(
            state.lanes().next().customers()[0].service_start(),
            Some(Timestamp::hm(8, 47))
        );
        state.clock.advance(1);
        assert_eq!(state.redirect_overdue(45).len(), 1);
        assert!(state.waiting().is_empty());
        assert_eq!(ids(state.lanes().next().customers()), vec![2, 3]);
    }

    #[rstest]
    fn test_not_arrived_never_redirected(mut state: SimulationState) {
        assert!(state.redirect_overdue(1).is_empty());
        assert_eq!(ids(state.waiting()), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_swap(mut state: SimulationState) {
        state.admit();
        assert!(!state.swap_lanes());
        assert_eq!(ids(state.lanes().current().customers()), vec![1]);
        state.clock.advance_to(Timestamp::hm(9, 0));
        state.redirect_overdue(45);
        assert!(state.swap_lanes());
        assert_eq!(ids(state.lanes().current().customers()), vec![2, 3]);
        assert_eq!(state.lanes().current().origin(), Timestamp::hm(9, 0));
        assert_eq!(ids(state.lanes().next().customers()), vec![1]);
    }

    #[test]
    fn test_idle_tick() {
        let mut state = SimulationState::new(Timestamp::hm(8, 0));
        assert!(state.is_idle());
        assert!(!state.tick());
        assert_eq!(state.time(), Timestamp::hm(8, 0));
        assert_eq!(state.statistics(), Statistics::default());
    }
}
