use std::collections::VecDeque;

use delegate::delegate;
use itertools::Itertools;
use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaChaRng};
use rand_distr::{Distribution, Uniform};

use crate::{
    ArrivalGenerator, ConfigError, Customer, Departure, Event, EventKind, LogEntry, Minutes,
    ServiceTimeGenerator, SimulationConfig, SimulationState, Statistics, Timestamp,
};

/// The outcome of [`Simulation::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Admissions, redirections, and departures, in the order they happened.
    pub log: Vec<LogEntry>,
    /// Statistics at the end of the run.
    pub statistics: Statistics,
    /// Clock at the beginning of the run.
    pub started: Timestamp,
    /// Clock at the end of the run.
    pub finished: Timestamp,
}

impl RunSummary {
    /// Iterates over the customers served in this run.
    pub fn departures(&self) -> impl Iterator<Item = &Departure> {
        self.log.iter().filter_map(|entry| match entry {
            LogEntry::Departed(departure) => Some(departure),
            _ => None,
        })
    }
}

/// Checkout simulation: one waiting queue, a current server lane, and a next lane that opens
/// for customers who waited too long.
///
/// The simulation owns its random number generator, so two simulations with the same seed and
/// the same calls produce the same results.
pub struct Simulation<R = ChaChaRng, A = Uniform<Minutes>, S = Uniform<Minutes>> {
    config: SimulationConfig,
    rng: R,
    arrivals: ArrivalGenerator<A>,
    service: ServiceTimeGenerator<S>,
    state: SimulationState,
    events: Vec<Event>,
}

impl Simulation {
    /// Constructs a simulation with a random number generator seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_seed(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, ChaChaRng::seed_from_u64(seed))
    }

    /// Constructs a simulation with a random number generator seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_entropy(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(config, ChaChaRng::from_entropy())
    }
}

impl<R: Rng> Simulation<R> {
    /// Constructs a simulation drawing arrival gaps and service times uniformly within the
    /// configured bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_generators(
            config,
            rng,
            ArrivalGenerator::uniform(config.max_arrival_gap),
            ServiceTimeGenerator::uniform(config.min_service, config.max_service),
        )
    }
}

impl<R, A, S> Simulation<R, A, S>
where
    R: Rng,
    A: Distribution<Minutes>,
    S: Distribution<Minutes>,
{
    /// Constructs a simulation with custom generators. Only the wait threshold of `config` is
    /// used, but the whole configuration must still be valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_generators(
        config: SimulationConfig,
        rng: R,
        arrivals: ArrivalGenerator<A>,
        service: ServiceTimeGenerator<S>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            arrivals,
            service,
            state: SimulationState::default(),
            events: Vec::new(),
        })
    }

    /// The configuration of this simulation.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Diagnostic events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    delegate! {
        to self.state {
            /// Current simulation time.
            #[must_use]
            pub fn time(&self) -> Timestamp;
            /// Customers in the waiting queue, in arrival order.
            #[must_use]
            pub fn waiting(&self) -> &VecDeque<Customer>;
            /// Whether nobody is waiting or being served.
            #[must_use]
            pub fn is_idle(&self) -> bool;
        }
    }

    /// Customers in the current lane.
    #[must_use]
    pub fn serving(&self) -> &VecDeque<Customer> {
        self.state.lanes().current().customers()
    }

    /// Customers redirected to the next lane and not served yet.
    #[must_use]
    pub fn redirected(&self) -> &VecDeque<Customer> {
        self.state.lanes().next().customers()
    }

    /// Returns the statistics accumulated so far. Before any run, everything is zero.
    #[must_use]
    pub fn report(&self) -> Statistics {
        self.state.statistics()
    }

    /// Generates `count` customers, the first one arriving at `first_arrival`, and appends them
    /// to the waiting queue. Returns the generated customers.
    pub fn enqueue_arrivals(&mut self, count: usize, first_arrival: Timestamp) -> Vec<Customer> {
        let customers = self
            .arrivals
            .generate(&mut self.rng, first_arrival, count);
        for customer in &customers {
            log::debug!(
                "Customer {} arrives at {}",
                customer.id(),
                customer.arrival()
            );
            self.events.push(Event {
                kind: EventKind::Arrival,
                time: customer.arrival(),
                customer: customer.id(),
            });
        }
        self.state.enqueue(customers.iter().cloned());
        customers
    }

    /// Runs a single iteration of the simulation loop and returns what happened to customers.
    /// Does nothing if the simulation is idle.
    pub fn step(&mut self) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        if self.state.is_idle() {
            return entries;
        }

        let rng = &mut self.rng;
        let service = &self.service;
        let departures = self.state.drain_current(|| service.sample(&mut *rng));
        entries.extend(departures.into_iter().map(LogEntry::Departed));

        entries.extend(self.state.admit());

        let redirected = self.state.redirect_overdue(self.config.wait_threshold());
        if !redirected.is_empty() {
            log::debug!(
                "Opening a new till at {} for customers: {}",
                self.state.time(),
                redirected.iter().map(LogEntry::customer).format(", ")
            );
        }
        entries.extend(redirected);

        if self.state.swap_lanes() {
            log::debug!(
                "Lanes swapped at {}; now serving: {}",
                self.state.time(),
                self.serving().iter().map(Customer::id).format(", ")
            );
        }

        if self.state.tick() {
            log::trace!("Clock advanced to {}", self.state.time());
        }

        for entry in &entries {
            log::info!("{}", entry);
            self.events.push(Event {
                kind: match entry {
                    LogEntry::Admitted { .. } => EventKind::ServiceStart,
                    LogEntry::Redirected { .. } => EventKind::Redirection,
                    LogEntry::Departed(_) => EventKind::Departure,
                },
                time: entry.time(),
                customer: entry.customer(),
            });
        }
        entries
    }

    /// Runs the simulation until every customer has departed.
    pub fn run(&mut self) -> RunSummary {
        let started = self.state.time();
        let mut log = Vec::new();
        while !self.state.is_idle() {
            log.extend(self.step());
        }
        log::info!("All customers have been served.");
        RunSummary {
            log,
            statistics: self.report(),
            started,
            finished: self.state.time(),
        }
    }
}
