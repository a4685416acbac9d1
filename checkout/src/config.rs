use serde::{Deserialize, Serialize};

use crate::Minutes;

/// Default upper bound of the gap between two consecutive arrivals.
pub const MAX_ARRIVAL_GAP: Minutes = 5;
/// Default lower bound of a service duration.
pub const MIN_SERVICE: Minutes = 10;
/// Default upper bound of a service duration.
pub const MAX_SERVICE: Minutes = 45;

/// Invalid simulation configuration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Arrivals must be at least one minute apart.
    #[error("maximum arrival gap must be at least 1")]
    ZeroArrivalGap,
    /// Service must take at least one minute.
    #[error("minimum service time must be at least 1")]
    ZeroServiceTime,
    /// Service duration bounds are reversed.
    #[error("minimum service time {min} is greater than maximum service time {max}")]
    ServiceBounds {
        /// Lower bound.
        min: Minutes,
        /// Upper bound.
        max: Minutes,
    },
    /// Zero threshold would redirect every customer as soon as it arrives.
    #[error("wait threshold must be at least 1")]
    ZeroWaitThreshold,
}

/// Simulation parameters.
///
/// Unless `wait_threshold` is set, it follows `max_service`: a customer waiting in the queue for
/// as long as the longest possible service is redirected to the next lane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Arrival gaps are drawn uniformly from `1..=max_arrival_gap`.
    pub max_arrival_gap: Minutes,
    /// Service durations are drawn uniformly from `min_service..=max_service`.
    pub min_service: Minutes,
    /// See `min_service`.
    pub max_service: Minutes,
    /// How long a customer may wait in the queue before being redirected to the next lane.
    /// See [`SimulationConfig::wait_threshold`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_threshold: Option<Minutes>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_arrival_gap: MAX_ARRIVAL_GAP,
            min_service: MIN_SERVICE,
            max_service: MAX_SERVICE,
            wait_threshold: None,
        }
    }
}

impl SimulationConfig {
    /// How long a customer may wait in the queue before being redirected to the next lane:
    /// `wait_threshold` if set, `max_service` otherwise.
    #[must_use]
    pub fn wait_threshold(&self) -> Minutes {
        self.wait_threshold.unwrap_or(self.max_service)
    }

    /// Checks that all bounds are sound.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`] for the list of rejected configurations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_arrival_gap == 0 {
            return Err(ConfigError::ZeroArrivalGap);
        }
        if self.min_service == 0 {
            return Err(ConfigError::ZeroServiceTime);
        }
        if self.min_service > self.max_service {
            return Err(ConfigError::ServiceBounds {
                min: self.min_service,
                max: self.max_service,
            });
        }
        if self.wait_threshold() == 0 {
            return Err(ConfigError::ZeroWaitThreshold);
        }
        Ok(())
    }
}
