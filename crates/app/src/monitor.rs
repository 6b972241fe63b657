//! Monitor loop: periodically samples the sensors and drives the actuators.
//!
//! Each tick takes a snapshot from the [`SensorSource`], stores it as the
//! current state, writes one reading per sensor kind to the [`SensorLog`],
//! evaluates the policy under the active mode and applies the result.
//! A failed tick is logged and retried after a longer delay; the loop itself
//! never stops on its own.

use std::sync::Arc;
use std::time::Duration;

use classroom_domain::device::Registry;
use classroom_domain::directive::Directive;
use classroom_domain::error::ClassroomError;
use classroom_domain::history::SensorReading;
use classroom_domain::id::DeviceId;
use classroom_domain::policy;
use classroom_domain::sensor::SensorSnapshot;
use tokio::task::JoinHandle;

use crate::ports::{ControlLog, SensorLog, SensorSource};
use crate::services::control_service::ControlService;

/// Timing of the monitor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Pause after a successful tick.
    pub tick_interval: Duration,
    /// Pause after a failed tick.
    pub retry_delay: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(5),
            retry_delay: Duration::from_secs(10),
        }
    }
}

/// What one tick observed and did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub snapshot: SensorSnapshot,
    pub directives: Vec<Directive>,
}

/// The periodic sample → persist → evaluate → apply loop.
pub struct Monitor<S, SL, CL> {
    source: S,
    sensor_log: SL,
    control: Arc<ControlService<CL>>,
    config: MonitorConfig,
}

impl<S, SL, CL> Monitor<S, SL, CL>
where
    S: SensorSource + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    pub fn new(
        source: S,
        sensor_log: SL,
        control: Arc<ControlService<CL>>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            sensor_log,
            control,
            config,
        }
    }

    /// Spawn the loop on the tokio runtime.
    ///
    /// The returned handle is the only way to stop it.
    pub fn start(self) -> JoinHandle<()> {
        tracing::info!(
            tick_secs = self.config.tick_interval.as_secs(),
            retry_secs = self.config.retry_delay.as_secs(),
            "monitor loop started"
        );
        tokio::spawn(self.run())
    }

    /// Tick forever.
    pub async fn run(self) {
        loop {
            let pause = match self.tick().await {
                Ok(report) => {
                    tracing::debug!(
                        directives = report.directives.len(),
                        "monitor tick completed"
                    );
                    self.config.tick_interval
                }
                Err(err) => {
                    tracing::warn!(%err, "monitor tick failed, retrying after delay");
                    self.config.retry_delay
                }
            };
            tokio::time::sleep(pause).await;
        }
    }

    /// Run one cycle.
    ///
    /// # Errors
    ///
    /// Returns the first error from the sensor source, the sensor log or the
    /// control service. The snapshot is stored as current state before the
    /// logs are written, so a storage failure does not hide fresh readings.
    pub async fn tick(&self) -> Result<TickReport, ClassroomError> {
        let snapshot = self.source.sample().await?;
        let state = self.control.state();
        state.replace_snapshot(snapshot.clone());

        self.sensor_log
            .append(readings_for(state.registry(), &snapshot))
            .await?;

        let directives = policy::evaluate(&snapshot, state.mode());
        self.control.apply_directives(&directives).await?;

        Ok(TickReport {
            snapshot,
            directives,
        })
    }
}

/// One log row per reading, attributed to the sensor that reports its kind.
fn readings_for(registry: &Registry, snapshot: &SensorSnapshot) -> Vec<SensorReading> {
    snapshot
        .readings
        .iter()
        .map(|(&kind, &value)| {
            let device_id = registry
                .sensor_for(kind)
                .map_or_else(|| DeviceId::from_static(kind.as_str()), |s| s.id.clone());
            SensorReading::builder(device_id, kind, value)
                .recorded_at(snapshot.captured_at)
                .build()
        })
        .collect()
}
