//! History service: read-only queries over the sensor and control logs.

use chrono::NaiveDate;
use classroom_domain::error::ClassroomError;
use classroom_domain::history::{ControlRecord, SensorReading, SensorSummary};
use classroom_domain::sensor::SensorKind;

use crate::ports::{ControlLog, SensorLog};

/// Number of rows returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 50;
/// Upper bound on the number of rows returned by one query.
pub const MAX_LIMIT: usize = 1000;

fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

/// Application service for history queries.
pub struct HistoryService<SL, CL> {
    sensor_log: SL,
    control_log: CL,
}

impl<SL: SensorLog, CL: ControlLog> HistoryService<SL, CL> {
    /// Create a new service backed by the given logs.
    pub fn new(sensor_log: SL, control_log: CL) -> Self {
        Self {
            sensor_log,
            control_log,
        }
    }

    /// Most recent sensor readings, newest-first.
    ///
    /// `limit` defaults to [`DEFAULT_LIMIT`] and is capped at [`MAX_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the sensor log.
    #[tracing::instrument(skip(self))]
    pub async fn recent_readings(
        &self,
        sensor: Option<SensorKind>,
        limit: Option<usize>,
    ) -> Result<Vec<SensorReading>, ClassroomError> {
        self.sensor_log.recent(sensor, clamp_limit(limit)).await
    }

    /// Most recent applied commands, newest-first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the control log.
    #[tracing::instrument(skip(self))]
    pub async fn recent_commands(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ControlRecord>, ClassroomError> {
        self.control_log.recent(clamp_limit(limit)).await
    }

    /// Per-sensor statistics for one UTC day, today when `date` is `None`.
    ///
    /// Returns the date that was summarised together with the rows.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the sensor log.
    #[tracing::instrument(skip(self))]
    pub async fn daily_summary(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<(NaiveDate, Vec<SensorSummary>), ClassroomError> {
        let date = date.unwrap_or_else(classroom_domain::time::today);
        let rows = self.sensor_log.daily_summary(date).await?;
        Ok((date, rows))
    }
}
