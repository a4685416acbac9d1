use serde::{Deserialize, Serialize};

use crate::{CustomerId, Minutes, Timestamp};

/// A customer going through the checkout.
///
/// A customer is created when it arrives, then it is placed in a server lane, which stamps its
/// service start time, and finally it departs. Each of these times is set exactly once, and they
/// never decrease in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    arrival: Timestamp,
    service_start: Option<Timestamp>,
    departure: Option<Timestamp>,
}

impl Customer {
    /// Constructs a customer arriving at `arrival`.
    #[must_use]
    pub fn new(id: CustomerId, arrival: Timestamp) -> Self {
        Self {
            id,
            arrival,
            service_start: None,
            departure: None,
        }
    }

    /// The ID of the customer, unique throughout the entire simulation.
    #[must_use]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// The time at which the customer joins the waiting queue.
    #[must_use]
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    /// The time at which the customer was moved into a server lane, if it already was.
    #[must_use]
    pub fn service_start(&self) -> Option<Timestamp> {
        self.service_start
    }

    /// The time at which the customer left, if it already did.
    #[must_use]
    pub fn departure(&self) -> Option<Timestamp> {
        self.departure
    }

    /// Minutes the customer has been waiting at `time`, or `None` if it has not arrived yet.
    #[must_use]
    pub fn waiting_at(&self, time: Timestamp) -> Option<Minutes> {
        time.since(self.arrival)
    }

    /// Stamps the service start time.
    ///
    /// # Panics
    ///
    /// Panics if the service start was already set, or if `time` is before the arrival.
    pub fn start_service(&mut self, time: Timestamp) {
        assert!(
            self.service_start.is_none(),
            "service of customer {} already started",
            self.id
        );
        assert!(
            time >= self.arrival,
            "customer {} cannot be served at {} before arriving at {}",
            self.id,
            time,
            self.arrival
        );
        self.service_start = Some(time);
    }

    /// Stamps the departure time and turns the customer into a departure record.
    ///
    /// # Panics
    ///
    /// Panics if the service has not started, or if `time` is before the service start.
    #[must_use]
    pub fn depart(mut self, time: Timestamp, service_time: Minutes) -> Departure {
        let service_start = self
            .service_start
            .unwrap_or_else(|| panic!("customer {} departs before service", self.id));
        assert!(
            time >= service_start,
            "customer {} cannot depart at {} before service start at {}",
            self.id,
            time,
            service_start
        );
        self.departure = Some(time);
        Departure {
            id: self.id,
            arrival: self.arrival,
            service_start,
            departure: time,
            service_time,
        }
    }
}

/// The record left behind by a customer that has been served.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Customer ID.
    pub id: CustomerId,
    /// When the customer arrived.
    pub arrival: Timestamp,
    /// When the customer was placed in a server lane.
    pub service_start: Timestamp,
    /// When the customer left.
    pub departure: Timestamp,
    /// The service duration drawn for this customer.
    pub service_time: Minutes,
}

impl Departure {
    /// Time accounted as this customer's wait: from service start to departure.
    #[must_use]
    pub fn wait(&self) -> Minutes {
        self.departure
            .since(self.service_start)
            .expect("departure precedes service start")
    }

    /// Time spent in the waiting queue before being placed in a server lane.
    #[must_use]
    pub fn queueing_delay(&self) -> Minutes {
        self.service_start
            .since(self.arrival)
            .expect("service start precedes arrival")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn customer() -> Customer {
        Customer::new(CustomerId::from(1), Timestamp::hm(8, 0))
    }

    #[test]
    fn test_lifecycle() {
        let mut customer = customer();
        assert_eq!(customer.service_start(), None);
        assert_eq!(customer.departure(), None);
        assert_eq!(customer.waiting_at(Timestamp::hm(7, 59)), None);
        assert_eq!(customer.waiting_at(Timestamp::hm(8, 30)), Some(30));
        customer.start_service(Timestamp::hm(8, 5));
        assert_eq!(customer.service_start(), Some(Timestamp::hm(8, 5)));
        let departure = customer.depart(Timestamp::hm(8, 20), 15);
        assert_eq!(
            departure,
            Departure {
                id: CustomerId::from(1),
                arrival: Timestamp::hm(8, 0),
                service_start: Timestamp::hm(8, 5),
                departure: Timestamp::hm(8, 20),
                service_time: 15,
            }
        );
        assert_eq!(departure.wait(), 15);
        assert_eq!(departure.queueing_delay(), 5);
    }

    #[test]
    #[should_panic(expected = "already started")]
    fn test_start_service_twice() {
        let mut customer = customer();
        customer.start_service(Timestamp::hm(8, 0));
        customer.start_service(Timestamp::hm(8, 1));
    }

    #[test]
    #[should_panic(expected = "before arriving")]
    fn test_start_service_before_arrival() {
        customer().start_service(Timestamp::hm(7, 0));
    }

    #[test]
    #[should_panic(expected = "departs before service")]
    fn test_depart_without_service() {
        let _ = customer().depart(Timestamp::hm(9, 0), 10);
    }
}
