//! History: persisted sensor readings and control commands.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directive::{Action, Directive};
use crate::id::{CommandId, DeviceId, ReadingId};
use crate::sensor::SensorKind;
use crate::time::Timestamp;

/// One sensor value as written to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: ReadingId,
    pub recorded_at: Timestamp,
    pub device_id: DeviceId,
    pub sensor: SensorKind,
    pub value: f64,
    pub unit: String,
}

impl SensorReading {
    /// Create a builder for constructing a [`SensorReading`].
    #[must_use]
    pub fn builder(device_id: DeviceId, sensor: SensorKind, value: f64) -> SensorReadingBuilder {
        SensorReadingBuilder {
            id: None,
            recorded_at: None,
            device_id,
            sensor,
            value,
            unit: None,
        }
    }
}

/// Step-by-step builder for [`SensorReading`].
#[derive(Debug)]
pub struct SensorReadingBuilder {
    id: Option<ReadingId>,
    recorded_at: Option<Timestamp>,
    device_id: DeviceId,
    sensor: SensorKind,
    value: f64,
    unit: Option<String>,
}

impl SensorReadingBuilder {
    #[must_use]
    pub fn id(mut self, id: ReadingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn recorded_at(mut self, recorded_at: Timestamp) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Override the unit. Defaults to the sensor kind's own unit.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Consume the builder and return a [`SensorReading`].
    #[must_use]
    pub fn build(self) -> SensorReading {
        SensorReading {
            id: self.id.unwrap_or_default(),
            recorded_at: self.recorded_at.unwrap_or_else(crate::time::now),
            unit: self
                .unit
                .unwrap_or_else(|| self.sensor.unit().to_string()),
            device_id: self.device_id,
            sensor: self.sensor,
            value: self.value,
        }
    }
}

/// One applied directive as written to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRecord {
    pub id: CommandId,
    pub recorded_at: Timestamp,
    pub device_id: DeviceId,
    pub command: Action,
    pub parameter: Option<f64>,
    pub reason: String,
}

impl ControlRecord {
    /// Record `directive` as applied at `recorded_at`.
    #[must_use]
    pub fn from_directive(directive: &Directive, recorded_at: Timestamp) -> Self {
        Self {
            id: CommandId::new(),
            recorded_at,
            device_id: directive.device.clone(),
            command: directive.action(),
            parameter: directive.command.target_temperature(),
            reason: directive.reason.clone(),
        }
    }
}

/// Aggregate of one sensor kind's readings over a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSummary {
    pub date: NaiveDate,
    pub sensor: SensorKind,
    pub count: u64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}
