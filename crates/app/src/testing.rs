//! In-memory port implementations shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use chrono::NaiveDate;
use classroom_domain::error::ClassroomError;
use classroom_domain::history::{ControlRecord, SensorReading, SensorSummary};
use classroom_domain::sensor::{SensorKind, SensorSnapshot};

use crate::ports::{ControlLog, SensorLog, SensorSource};

#[derive(Default)]
pub struct InMemorySensorLog {
    pub readings: Mutex<Vec<SensorReading>>,
    pub fail: bool,
}

impl SensorLog for InMemorySensorLog {
    fn append(
        &self,
        readings: Vec<SensorReading>,
    ) -> impl Future<Output = Result<(), ClassroomError>> + Send {
        let result = if self.fail {
            Err(ClassroomError::Storage("disk full".into()))
        } else {
            self.readings.lock().unwrap().extend(readings);
            Ok(())
        };
        async { result }
    }

    fn recent(
        &self,
        sensor: Option<SensorKind>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, ClassroomError>> + Send {
        let result: Vec<_> = self
            .readings
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| sensor.is_none_or(|kind| r.sensor == kind))
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn daily_summary(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<SensorSummary>, ClassroomError>> + Send {
        let readings = self.readings.lock().unwrap();
        let result: Vec<_> = SensorKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let values: Vec<f64> = readings
                    .iter()
                    .filter(|r| r.sensor == kind && r.recorded_at.date_naive() == date)
                    .map(|r| r.value)
                    .collect();
                if values.is_empty() {
                    return None;
                }
                #[allow(clippy::cast_precision_loss)]
                let avg = values.iter().sum::<f64>() / values.len() as f64;
                Some(SensorSummary {
                    date,
                    sensor: kind,
                    count: values.len() as u64,
                    avg,
                    min: values.iter().copied().fold(f64::INFINITY, f64::min),
                    max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                })
            })
            .collect();
        async { Ok(result) }
    }
}

#[derive(Default)]
pub struct InMemoryControlLog {
    pub records: Mutex<Vec<ControlRecord>>,
}

impl ControlLog for InMemoryControlLog {
    fn append(
        &self,
        records: Vec<ControlRecord>,
    ) -> impl Future<Output = Result<(), ClassroomError>> + Send {
        self.records.lock().unwrap().extend(records);
        async { Ok(()) }
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ControlRecord>, ClassroomError>> + Send {
        let result: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

/// Replays queued results, then fails once the queue is empty.
#[derive(Default)]
pub struct ScriptedSource {
    pub queue: Mutex<VecDeque<Result<SensorSnapshot, ClassroomError>>>,
}

impl ScriptedSource {
    pub fn with(results: Vec<Result<SensorSnapshot, ClassroomError>>) -> Self {
        Self {
            queue: Mutex::new(results.into()),
        }
    }
}

impl SensorSource for ScriptedSource {
    fn sample(&self) -> impl Future<Output = Result<SensorSnapshot, ClassroomError>> + Send {
        let next = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClassroomError::Storage("source exhausted".into())));
        async { next }
    }
}
