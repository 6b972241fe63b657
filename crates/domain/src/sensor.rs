//! Sensor kinds and the per-tick [`SensorSnapshot`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Timestamp;

/// Temperature assumed when a snapshot carries no temperature reading.
pub const NEUTRAL_TEMPERATURE: f64 = 25.0;

/// The physical quantity a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Temperature,
    Humidity,
    Light,
    Co2,
    /// Passive-infrared presence detector; `1` means someone is in the room.
    #[serde(alias = "pir")]
    Occupancy,
}

impl SensorKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 5] = [
        Self::Temperature,
        Self::Humidity,
        Self::Light,
        Self::Co2,
        Self::Occupancy,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Co2 => "co2",
            Self::Occupancy => "occupancy",
        }
    }

    /// Unit the reading is expressed in.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "\u{b0}C",
            Self::Humidity => "%",
            Self::Light => "lux",
            Self::Co2 => "ppm",
            Self::Occupancy => "",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "light" => Ok(Self::Light),
            "co2" => Ok(Self::Co2),
            "occupancy" | "pir" => Ok(Self::Occupancy),
            other => Err(ValidationError::UnknownSensor(other.to_string())),
        }
    }
}

/// Whether anyone is in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Present,
    Absent,
}

impl Occupancy {
    /// Interpret a raw presence reading: anything above zero is a detection.
    #[must_use]
    pub fn from_reading(value: f64) -> Self {
        if value > 0.0 {
            Self::Present
        } else {
            Self::Absent
        }
    }

    #[must_use]
    pub fn as_reading(self) -> f64 {
        match self {
            Self::Present => 1.0,
            Self::Absent => 0.0,
        }
    }
}

/// One timestamped set of sensor readings.
///
/// Readings may be partial. The typed accessors fall back to neutral values
/// so that consumers never have to handle a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub readings: BTreeMap<SensorKind, f64>,
    pub captured_at: Timestamp,
}

impl SensorSnapshot {
    /// Create a builder for constructing a [`SensorSnapshot`].
    #[must_use]
    pub fn builder() -> SensorSnapshotBuilder {
        SensorSnapshotBuilder::default()
    }

    /// The values shown before the first sample arrives.
    #[must_use]
    pub fn initial() -> Self {
        Self::builder()
            .reading(SensorKind::Temperature, 25.0)
            .reading(SensorKind::Humidity, 50.0)
            .reading(SensorKind::Light, 500.0)
            .reading(SensorKind::Co2, 800.0)
            .occupancy(Occupancy::Absent)
            .build()
    }

    /// Raw reading for `kind`, if the source supplied one.
    #[must_use]
    pub fn get(&self, kind: SensorKind) -> Option<f64> {
        self.readings.get(&kind).copied()
    }

    /// Temperature in °C, defaulting to [`NEUTRAL_TEMPERATURE`].
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.get(SensorKind::Temperature)
            .unwrap_or(NEUTRAL_TEMPERATURE)
    }

    /// Illuminance in lux, defaulting to `0`.
    #[must_use]
    pub fn light(&self) -> f64 {
        self.get(SensorKind::Light).unwrap_or(0.0)
    }

    /// CO2 concentration in ppm, defaulting to `0`.
    #[must_use]
    pub fn co2(&self) -> f64 {
        self.get(SensorKind::Co2).unwrap_or(0.0)
    }

    /// Presence, defaulting to [`Occupancy::Absent`].
    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        self.get(SensorKind::Occupancy)
            .map_or(Occupancy::Absent, Occupancy::from_reading)
    }
}

/// Step-by-step builder for [`SensorSnapshot`].
#[derive(Debug, Default)]
pub struct SensorSnapshotBuilder {
    readings: BTreeMap<SensorKind, f64>,
    captured_at: Option<Timestamp>,
}

impl SensorSnapshotBuilder {
    /// Record a reading. Non-finite values are dropped and read back as missing.
    #[must_use]
    pub fn reading(mut self, kind: SensorKind, value: f64) -> Self {
        if value.is_finite() {
            self.readings.insert(kind, value);
        }
        self
    }

    #[must_use]
    pub fn occupancy(self, occupancy: Occupancy) -> Self {
        self.reading(SensorKind::Occupancy, occupancy.as_reading())
    }

    #[must_use]
    pub fn captured_at(mut self, captured_at: Timestamp) -> Self {
        self.captured_at = Some(captured_at);
        self
    }

    /// Consume the builder and return a [`SensorSnapshot`].
    #[must_use]
    pub fn build(self) -> SensorSnapshot {
        SensorSnapshot {
            readings: self.readings,
            captured_at: self.captured_at.unwrap_or_else(crate::time::now),
        }
    }
}
