//! Sensor log port: persistence for sensor readings.

use std::future::Future;

use chrono::NaiveDate;
use classroom_domain::error::ClassroomError;
use classroom_domain::history::{SensorReading, SensorSummary};
use classroom_domain::sensor::SensorKind;

/// Append-only store of [`SensorReading`]s.
pub trait SensorLog {
    /// Persist a batch of readings.
    fn append(
        &self,
        readings: Vec<SensorReading>,
    ) -> impl Future<Output = Result<(), ClassroomError>> + Send;

    /// Get the most recent readings, newest-first, optionally for one sensor kind.
    fn recent(
        &self,
        sensor: Option<SensorKind>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, ClassroomError>> + Send;

    /// Aggregate the readings recorded on `date` (UTC), one row per sensor kind.
    fn daily_summary(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<SensorSummary>, ClassroomError>> + Send;
}

impl<T: SensorLog + Send + Sync> SensorLog for std::sync::Arc<T> {
    fn append(
        &self,
        readings: Vec<SensorReading>,
    ) -> impl Future<Output = Result<(), ClassroomError>> + Send {
        (**self).append(readings)
    }

    fn recent(
        &self,
        sensor: Option<SensorKind>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, ClassroomError>> + Send {
        (**self).recent(sensor, limit)
    }

    fn daily_summary(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<SensorSummary>, ClassroomError>> + Send {
        (**self).daily_summary(date)
    }
}
