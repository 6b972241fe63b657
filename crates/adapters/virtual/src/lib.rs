//! # classroom-adapter-virtual
//!
//! Simulated classroom that stands in for real sensors.
//!
//! ## Generated readings
//!
//! | Sensor | Distribution |
//! |--------|--------------|
//! | temperature | `22 + U(-3, 8)` °C, rounded to one decimal |
//! | humidity | uniform integer in `40..=75` % |
//! | light | uniform integer in `0..=1000` lux |
//! | co2 | uniform integer in `400..=1500` ppm |
//! | occupancy | `1` with probability `occupancy_probability`, else `0` |
//!
//! ## Dependency rule
//!
//! Depends on `classroom-app` (port traits) and `classroom-domain` only.

mod generator;

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::distr::{Bernoulli, BernoulliError};
use rand::rngs::StdRng;

use classroom_app::ports::SensorSource;
use classroom_domain::error::ClassroomError;
use classroom_domain::sensor::SensorSnapshot;

/// Errors raised while setting up the simulator.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("occupancy probability must be within 0..=1, got {0}")]
    InvalidProbability(f64, #[source] BernoulliError),
}

/// Tuning knobs for [`SimulatedClassroom`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Chance that a sample reports someone in the room.
    pub occupancy_probability: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            occupancy_probability: 0.25,
        }
    }
}

/// A [`SensorSource`] that draws every reading at random.
pub struct SimulatedClassroom {
    rng: Mutex<StdRng>,
    occupancy: Bernoulli,
}

impl SimulatedClassroom {
    /// Create a simulator seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidProbability`] when the occupancy
    /// probability is outside `0..=1`.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a simulator that replays the same sequence for the same seed.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidProbability`] when the occupancy
    /// probability is outside `0..=1`.
    pub fn seeded(config: SimulatorConfig, seed: u64) -> Result<Self, SimulatorError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulatorConfig, rng: StdRng) -> Result<Self, SimulatorError> {
        let p = config.occupancy_probability;
        let occupancy =
            Bernoulli::new(p).map_err(|err| SimulatorError::InvalidProbability(p, err))?;
        tracing::debug!(occupancy_probability = p, "sensor simulator ready");
        Ok(Self {
            rng: Mutex::new(rng),
            occupancy,
        })
    }

    /// Draw one snapshot.
    #[must_use]
    pub fn next_snapshot(&self) -> SensorSnapshot {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generator::snapshot(&mut *rng, &self.occupancy)
    }
}

impl SensorSource for SimulatedClassroom {
    async fn sample(&self) -> Result<SensorSnapshot, ClassroomError> {
        Ok(self.next_snapshot())
    }
}
