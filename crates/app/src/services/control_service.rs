//! Control service: use-cases that change what the actuators are doing.

use std::sync::Arc;

use classroom_domain::device::DeviceOverview;
use classroom_domain::directive::{Action, Directive};
use classroom_domain::error::ClassroomError;
use classroom_domain::history::ControlRecord;
use classroom_domain::id::DeviceId;
use classroom_domain::mode::Mode;
use classroom_domain::policy;
use classroom_domain::sensor::SensorSnapshot;

use crate::ports::ControlLog;
use crate::state::ClassroomState;

/// Reason recorded when an operator does not give one.
pub const DEFAULT_MANUAL_REASON: &str = "manual control";

/// An operator request to drive one actuator.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualCommand {
    pub device_id: DeviceId,
    pub action: Action,
    pub target_temperature: Option<f64>,
    pub reason: Option<String>,
}

/// Application service for actuator control and scene changes.
pub struct ControlService<L> {
    state: Arc<ClassroomState>,
    log: L,
}

impl<L: ControlLog> ControlService<L> {
    /// Create a new service over the shared state, logging to `log`.
    pub fn new(state: Arc<ClassroomState>, log: L) -> Self {
        Self { state, log }
    }

    #[must_use]
    pub fn state(&self) -> &Arc<ClassroomState> {
        &self.state
    }

    /// Apply `directives` in order and log each one.
    ///
    /// Later directives for the same device overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ClassroomError::NotFound`] for a directive naming an unknown
    /// actuator, or a storage error from the control log.
    pub async fn apply_directives(&self, directives: &[Directive]) -> Result<(), ClassroomError> {
        if directives.is_empty() {
            return Ok(());
        }

        let now = classroom_domain::time::now();
        let mut records = Vec::with_capacity(directives.len());
        for directive in directives {
            self.state.apply(directive)?;
            tracing::debug!(%directive, reason = %directive.reason, "directive applied");
            records.push(ControlRecord::from_directive(directive, now));
        }
        self.log.append(records).await
    }

    /// Validate an operator request and carry it out.
    ///
    /// # Errors
    ///
    /// Returns [`ClassroomError::NotFound`] when the device is not an installed
    /// actuator, [`ClassroomError::Validation`] when it cannot perform the
    /// action, or a storage error from the control log.
    #[tracing::instrument(skip(self), fields(device = %command.device_id, action = %command.action))]
    pub async fn manual_control(&self, command: ManualCommand) -> Result<Directive, ClassroomError> {
        let actuator = self.state.registry().actuator(&command.device_id)?;
        let reason = command
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MANUAL_REASON.to_string());
        let directive = Directive::for_actuator(
            actuator,
            command.action,
            command.target_temperature,
            reason,
        )?;

        self.apply_directives(std::slice::from_ref(&directive))
            .await?;
        tracing::info!(%directive, "manual control applied");
        Ok(directive)
    }

    /// Switch the active mode.
    ///
    /// A scene takes effect immediately: it is evaluated against the current
    /// snapshot and applied. Returns the directives that were applied.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the control log.
    #[tracing::instrument(skip(self))]
    pub async fn set_mode(&self, mode: Mode) -> Result<Vec<Directive>, ClassroomError> {
        let previous = self.state.set_mode(mode);
        tracing::info!(from = %previous, to = %mode, "mode changed");

        if !mode.is_scene() {
            return Ok(Vec::new());
        }

        let directives = policy::evaluate(&self.state.snapshot(), mode);
        self.apply_directives(&directives).await?;
        Ok(directives)
    }

    /// What the policy would do right now, without applying anything.
    #[must_use]
    pub fn preview(&self) -> Vec<Directive> {
        policy::evaluate(&self.state.snapshot(), self.state.mode())
    }

    #[must_use]
    pub fn devices(&self) -> DeviceOverview {
        self.state.overview()
    }

    #[must_use]
    pub fn current_snapshot(&self) -> SensorSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }
}
