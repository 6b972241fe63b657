//! Directives: one commanded actuator action with its justification.
//!
//! Commands are typed per actuator kind: a curtain only opens and closes,
//! only the air conditioner carries a target temperature. Anything else is
//! rejected when the directive is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::{ActuatorDevice, ActuatorKind, ActuatorStatus};
use crate::error::ValidationError;
use crate::id::DeviceId;

/// Lowest target temperature the air conditioner accepts, in °C.
pub const MIN_TARGET_TEMPERATURE: f64 = 16.0;
/// Highest target temperature the air conditioner accepts, in °C.
pub const MAX_TARGET_TEMPERATURE: f64 = 30.0;

/// The verb of a command, independent of the device it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    On,
    Off,
    Open,
    Close,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Open => "open",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "open" => Ok(Self::Open),
            "close" | "closed" => Ok(Self::Close),
            _ => Err(ValidationError::UnknownAction(s.to_string())),
        }
    }
}

/// On/off switching for lights and fans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    On,
    Off,
}

/// Air-conditioner command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcCommand {
    On { target_temperature: Option<f64> },
    Off,
}

/// Curtain command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurtainCommand {
    Open,
    Close,
}

/// A command addressed to one kind of actuator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Light(Power),
    Fan(Power),
    Ac(AcCommand),
    Curtain(CurtainCommand),
}

impl Command {
    /// Build the typed command for `kind` from a loose action and parameter.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnsupportedCommand`] when `kind` cannot perform `action`
    /// - [`ValidationError::TargetTemperatureNotAllowed`] when a target is given
    ///   for anything but turning the AC on
    /// - [`ValidationError::TargetTemperatureOutOfRange`] when the target is
    ///   outside [`MIN_TARGET_TEMPERATURE`]..=[`MAX_TARGET_TEMPERATURE`]
    pub fn from_action(
        kind: ActuatorKind,
        action: Action,
        target_temperature: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let unsupported = || ValidationError::UnsupportedCommand {
            device: kind.to_string(),
            action: action.to_string(),
        };

        if target_temperature.is_some() && !(kind == ActuatorKind::Ac && action == Action::On) {
            return Err(ValidationError::TargetTemperatureNotAllowed);
        }

        let power = |action| match action {
            Action::On => Ok(Power::On),
            Action::Off => Ok(Power::Off),
            Action::Open | Action::Close => Err(unsupported()),
        };

        match kind {
            ActuatorKind::Light => power(action).map(Self::Light),
            ActuatorKind::Fan => power(action).map(Self::Fan),
            ActuatorKind::Ac => match action {
                Action::On => {
                    if let Some(target) = target_temperature {
                        if !(MIN_TARGET_TEMPERATURE..=MAX_TARGET_TEMPERATURE).contains(&target) {
                            return Err(ValidationError::TargetTemperatureOutOfRange(target));
                        }
                    }
                    Ok(Self::Ac(AcCommand::On { target_temperature }))
                }
                Action::Off => Ok(Self::Ac(AcCommand::Off)),
                Action::Open | Action::Close => Err(unsupported()),
            },
            ActuatorKind::Curtain => match action {
                Action::Open => Ok(Self::Curtain(CurtainCommand::Open)),
                Action::Close => Ok(Self::Curtain(CurtainCommand::Close)),
                Action::On | Action::Off => Err(unsupported()),
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActuatorKind {
        match self {
            Self::Light(_) => ActuatorKind::Light,
            Self::Fan(_) => ActuatorKind::Fan,
            Self::Ac(_) => ActuatorKind::Ac,
            Self::Curtain(_) => ActuatorKind::Curtain,
        }
    }

    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Self::Light(Power::On) | Self::Fan(Power::On) | Self::Ac(AcCommand::On { .. }) => {
                Action::On
            }
            Self::Light(Power::Off) | Self::Fan(Power::Off) | Self::Ac(AcCommand::Off) => {
                Action::Off
            }
            Self::Curtain(CurtainCommand::Open) => Action::Open,
            Self::Curtain(CurtainCommand::Close) => Action::Close,
        }
    }

    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        match self {
            Self::Ac(AcCommand::On { target_temperature }) => *target_temperature,
            _ => None,
        }
    }

    /// Status the actuator ends up in once the command is carried out.
    #[must_use]
    pub fn resulting_status(&self) -> ActuatorStatus {
        match self.action() {
            Action::On => ActuatorStatus::On,
            Action::Off => ActuatorStatus::Off,
            Action::Open => ActuatorStatus::Open,
            Action::Close => ActuatorStatus::Closed,
        }
    }
}

/// One commanded actuator action with its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "DirectiveRecord", try_from = "DirectiveRecord")]
pub struct Directive {
    pub device: DeviceId,
    pub command: Command,
    pub reason: String,
}

impl Directive {
    #[must_use]
    pub fn new(device: &'static str, command: Command, reason: impl Into<String>) -> Self {
        Self {
            device: DeviceId::from_static(device),
            command,
            reason: reason.into(),
        }
    }

    /// Build a directive for an installed actuator from a loose request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the actuator cannot perform the
    /// action (see [`Command::from_action`]).
    pub fn for_actuator(
        actuator: &ActuatorDevice,
        action: Action,
        target_temperature: Option<f64>,
        reason: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let command = Command::from_action(actuator.kind, action, target_temperature).map_err(
            |err| match err {
                ValidationError::UnsupportedCommand { action, .. } => {
                    ValidationError::UnsupportedCommand {
                        device: actuator.id.to_string(),
                        action,
                    }
                }
                other => other,
            },
        )?;
        Ok(Self {
            device: actuator.id.clone(),
            command,
            reason: reason.into(),
        })
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.command.action()
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.device, self.action())?;
        if let Some(target) = self.command.target_temperature() {
            write!(f, " @{target}\u{b0}C")?;
        }
        Ok(())
    }
}

/// Flat wire form of a [`Directive`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DirectiveRecord {
    device: DeviceId,
    #[serde(rename = "type")]
    kind: ActuatorKind,
    action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_temperature: Option<f64>,
    #[serde(default)]
    reason: String,
}

impl From<Directive> for DirectiveRecord {
    fn from(d: Directive) -> Self {
        Self {
            kind: d.command.kind(),
            action: d.command.action(),
            target_temperature: d.command.target_temperature(),
            device: d.device,
            reason: d.reason,
        }
    }
}

impl TryFrom<DirectiveRecord> for Directive {
    type Error = ValidationError;

    fn try_from(r: DirectiveRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            command: Command::from_action(r.kind, r.action, r.target_temperature)?,
            device: r.device,
            reason: r.reason,
        })
    }
}
