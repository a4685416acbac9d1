//! Checkout queue simulation.
//!
//! Customers arrive at random intervals and wait in a single FIFO queue for the current till.
//! Whoever waits too long is sent to a next till, which takes turns with the current one.
//! The simulation advances a minute-resolution clock and accumulates the area under the queue
//! length and busy till curves, as well as the total time customers spent at the tills.
//!
//! # Examples
//!
//! ```
//! # use checkout::{Simulation, SimulationConfig, Timestamp};
//! # fn main() -> Result<(), checkout::Error> {
//! let mut simulation = Simulation::from_seed(SimulationConfig::default(), 7)?;
//! simulation.enqueue_arrivals(3, "08:00".parse()?);
//! let summary = simulation.run();
//! assert_eq!(summary.statistics.customers_served, 3);
//! assert_eq!(simulation.report(), summary.statistics);
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

mod clock;
pub use clock::Clock;

mod config;
pub use config::{ConfigError, SimulationConfig, MAX_ARRIVAL_GAP, MAX_SERVICE, MIN_SERVICE};

mod customer;
pub use customer::{Customer, Departure};

mod event;
pub use event::{Event, EventKind, LogEntry};

mod generator;
pub use generator::{ArrivalGenerator, ServiceTimeGenerator};

mod simulation;
pub use simulation::{RunSummary, Simulation};

mod state;
pub use state::{Lanes, ServerLane, SimulationState};

mod statistics;
pub use statistics::Statistics;

mod time;
pub use time::{format_duration, Minutes, Timestamp, TimestampError};

/// Customer ID.
#[derive(
    From,
    Into,
    Debug,
    PartialEq,
    PartialOrd,
    Eq,
    Ord,
    Serialize,
    Deserialize,
    Copy,
    Clone,
    Hash,
    Display,
)]
pub struct CustomerId(usize);

/// Error type encompassing all errors of the simulation library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid simulation configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Malformed timestamp.
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

/// Result alias using [`Error`](enum.Error.html).
pub type Result<T> = std::result::Result<T, Error>;
