//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ClassroomError`] via `#[from]` / `From` impls.

/// Top-level error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum ClassroomError {
    /// A request or value broke a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced device or record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("device id must not be empty")]
    EmptyDeviceId,

    #[error("unknown sensor kind: {0}")]
    UnknownSensor(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("unknown scene mode: {0}")]
    UnknownMode(String),

    #[error("device {device} does not support {action}")]
    UnsupportedCommand { device: String, action: String },

    #[error("target temperature {0} is outside the 16-30 range")]
    TargetTemperatureOutOfRange(f64),

    #[error("target temperature is only accepted when turning the AC on")]
    TargetTemperatureNotAllowed,

    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// A lookup that came back empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_classroom_error() {
        let err: ClassroomError = ValidationError::EmptyDeviceId.into();
        assert!(matches!(
            err,
            ClassroomError::Validation(ValidationError::EmptyDeviceId)
        ));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Actuator",
            id: "projector1".to_string(),
        };
        assert_eq!(err.to_string(), "Actuator not found: projector1");
    }

    #[test]
    fn should_display_unsupported_command() {
        let err = ValidationError::UnsupportedCommand {
            device: "curtain1".to_string(),
            action: "on".to_string(),
        };
        assert_eq!(err.to_string(), "device curtain1 does not support on");
    }
}
