use std::fmt;

use serde::Serialize;

use crate::{format_duration, CustomerId, Departure, Timestamp};

/// Kind of a diagnostic event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, strum::ToString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Customer joined the waiting queue.
    Arrival,
    /// Customer was admitted to the current lane.
    ServiceStart,
    /// Customer was moved from the waiting queue to the next lane.
    Redirection,
    /// Customer was served and left.
    Departure,
}

/// A diagnostic event. Events are only ever appended and never drive the simulation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// When it happened.
    pub time: Timestamp,
    /// To whom it happened.
    pub customer: CustomerId,
}

/// One line of the run log: something happened to a customer while serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    /// Queue head was admitted to the current lane.
    Admitted {
        /// Customer ID.
        id: CustomerId,
        /// Arrival time.
        arrival: Timestamp,
        /// Admission time.
        service_start: Timestamp,
    },
    /// Customer waited too long and was sent to the next lane.
    Redirected {
        /// Customer ID.
        id: CustomerId,
        /// Arrival time.
        arrival: Timestamp,
        /// Redirection time.
        time: Timestamp,
    },
    /// Customer was served.
    Departed(Departure),
}

impl LogEntry {
    /// ID of the customer the entry is about.
    #[must_use]
    pub fn customer(&self) -> CustomerId {
        match self {
            Self::Admitted { id, .. } | Self::Redirected { id, .. } => *id,
            Self::Departed(departure) => departure.id,
        }
    }

    /// Time of the entry.
    #[must_use]
    pub fn time(&self) -> Timestamp {
        match self {
            Self::Admitted { service_start, .. } => *service_start,
            Self::Redirected { time, .. } => *time,
            Self::Departed(departure) => departure.departure,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admitted {
                id,
                arrival,
                service_start,
            } => write!(
                f,
                "Customer {} (arrived {}) admitted at {}",
                id, arrival, service_start
            ),
            Self::Redirected { id, arrival, time } => write!(
                f,
                "Customer {} (arrived {}) redirected to a new till at {}",
                id, arrival, time
            ),
            Self::Departed(departure) => write!(
                f,
                "Customer {} (arrived {}, served from {}) departed at {} after {} minutes, wait {}",
                departure.id,
                departure.arrival,
                departure.service_start,
                departure.departure,
                departure.service_time,
                format_duration(u64::from(departure.wait()))
            ),
        }
    }
}
