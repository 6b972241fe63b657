//! Devices: the fixed sensor and actuator layout of the classroom.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::directive::{AcCommand, Command};
use crate::error::NotFoundError;
use crate::id::DeviceId;
use crate::sensor::SensorKind;
use crate::time::Timestamp;

/// Main ceiling light.
pub const MAIN_LIGHT: &str = "light1";
/// Ventilation fan.
pub const FAN: &str = "fan1";
/// Air conditioner.
pub const AIR_CONDITIONER: &str = "ac1";
/// Window curtain.
pub const CURTAIN: &str = "curtain1";

/// What an actuator physically is, which decides the commands it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorKind {
    Light,
    Fan,
    Ac,
    Curtain,
}

impl ActuatorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Fan => "fan",
            Self::Ac => "ac",
            Self::Curtain => "curtain",
        }
    }
}

impl fmt::Display for ActuatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last known physical status of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorStatus {
    On,
    Off,
    Open,
    Closed,
}

impl fmt::Display for ActuatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// A sensor mounted in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDevice {
    pub id: DeviceId,
    #[serde(rename = "type")]
    pub kind: SensorKind,
    pub location: String,
}

/// A controllable device mounted in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorDevice {
    pub id: DeviceId,
    #[serde(rename = "type")]
    pub kind: ActuatorKind,
    pub location: String,
    /// Status assumed until the first directive is applied.
    pub initial_status: ActuatorStatus,
}

/// Last known state of one actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuatorState {
    pub status: ActuatorStatus,
    /// Last target the AC was given. Kept across off/on cycles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_temperature: Option<f64>,
    /// `None` until the first command is applied.
    #[serde(default)]
    pub last_changed: Option<Timestamp>,
}

impl ActuatorState {
    #[must_use]
    pub fn initial(status: ActuatorStatus) -> Self {
        Self {
            status,
            target_temperature: None,
            last_changed: None,
        }
    }

    /// Carry out `command` at `at`.
    pub fn apply(&mut self, command: &Command, at: Timestamp) {
        self.status = command.resulting_status();
        if let Command::Ac(AcCommand::On {
            target_temperature: Some(target),
        }) = command
        {
            self.target_temperature = Some(*target);
        }
        self.last_changed = Some(at);
    }
}

/// An installed actuator together with its current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActuatorView {
    #[serde(flatten)]
    pub device: ActuatorDevice,
    #[serde(flatten)]
    pub state: ActuatorState,
}

/// Everything installed in the room, as reported by the device listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceOverview {
    pub sensors: Vec<SensorDevice>,
    pub actuators: Vec<ActuatorView>,
}

/// The set of devices installed in the classroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    sensors: Vec<SensorDevice>,
    actuators: Vec<ActuatorDevice>,
}

impl Registry {
    /// The standard classroom: five sensors and four actuators.
    #[must_use]
    pub fn classroom() -> Self {
        let sensor = |id, kind, location: &str| SensorDevice {
            id: DeviceId::from_static(id),
            kind,
            location: location.to_string(),
        };
        let actuator = |id, kind, location: &str, initial_status| ActuatorDevice {
            id: DeviceId::from_static(id),
            kind,
            location: location.to_string(),
            initial_status,
        };

        Self {
            sensors: vec![
                sensor("temp1", SensorKind::Temperature, "front"),
                sensor("humi1", SensorKind::Humidity, "front"),
                sensor("light_sensor1", SensorKind::Light, "window"),
                sensor("co2_sensor1", SensorKind::Co2, "middle"),
                sensor("pir1", SensorKind::Occupancy, "door"),
            ],
            actuators: vec![
                actuator(MAIN_LIGHT, ActuatorKind::Light, "front", ActuatorStatus::Off),
                actuator(FAN, ActuatorKind::Fan, "back", ActuatorStatus::Off),
                actuator(CURTAIN, ActuatorKind::Curtain, "window", ActuatorStatus::Closed),
                actuator(AIR_CONDITIONER, ActuatorKind::Ac, "side", ActuatorStatus::Off),
            ],
        }
    }

    #[must_use]
    pub fn sensors(&self) -> &[SensorDevice] {
        &self.sensors
    }

    #[must_use]
    pub fn actuators(&self) -> &[ActuatorDevice] {
        &self.actuators
    }

    /// The sensor that reports `kind`, if one is installed.
    #[must_use]
    pub fn sensor_for(&self, kind: SensorKind) -> Option<&SensorDevice> {
        self.sensors.iter().find(|s| s.kind == kind)
    }

    /// Look up an actuator by id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no actuator with `id` is installed.
    pub fn actuator(&self, id: &DeviceId) -> Result<&ActuatorDevice, NotFoundError> {
        self.actuators
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| NotFoundError {
                entity: "Actuator",
                id: id.to_string(),
            })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::classroom()
    }
}
