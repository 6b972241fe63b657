//! Shared classroom state: latest snapshot, active mode and actuator states.
//!
//! One [`ClassroomState`] is shared through an `Arc` between the monitor loop
//! and every request handler. Each field sits behind its own lock; writers
//! never hold more than one at a time, so the last write wins.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use classroom_domain::device::{ActuatorState, ActuatorView, DeviceOverview, Registry};
use classroom_domain::directive::Directive;
use classroom_domain::error::NotFoundError;
use classroom_domain::id::DeviceId;
use classroom_domain::mode::Mode;
use classroom_domain::sensor::SensorSnapshot;

/// Process-wide state holder.
pub struct ClassroomState {
    registry: Registry,
    snapshot: RwLock<SensorSnapshot>,
    mode: RwLock<Mode>,
    actuators: RwLock<BTreeMap<DeviceId, ActuatorState>>,
}

impl ClassroomState {
    /// Start from [`SensorSnapshot::initial`] with every actuator in its
    /// initial status.
    #[must_use]
    pub fn new(registry: Registry, mode: Mode) -> Self {
        let actuators = registry
            .actuators()
            .iter()
            .map(|a| (a.id.clone(), ActuatorState::initial(a.initial_status)))
            .collect();
        Self {
            registry,
            snapshot: RwLock::new(SensorSnapshot::initial()),
            mode: RwLock::new(mode),
            actuators: RwLock::new(actuators),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Copy of the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace_snapshot(&self, snapshot: SensorSnapshot) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `mode`, returning the previous one.
    pub fn set_mode(&self, mode: Mode) -> Mode {
        let mut guard = self.mode.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, mode)
    }

    /// Record the effect of `directive` on its actuator.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the directive names an actuator that is
    /// not installed.
    pub fn apply(&self, directive: &Directive) -> Result<ActuatorState, NotFoundError> {
        let mut actuators = self
            .actuators
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let state = actuators
            .get_mut(&directive.device)
            .ok_or_else(|| NotFoundError {
                entity: "Actuator",
                id: directive.device.to_string(),
            })?;
        state.apply(&directive.command, classroom_domain::time::now());
        Ok(*state)
    }

    /// Copy of every actuator's state, keyed by id.
    #[must_use]
    pub fn actuator_states(&self) -> BTreeMap<DeviceId, ActuatorState> {
        self.actuators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The registry joined with the current actuator states.
    #[must_use]
    pub fn overview(&self) -> DeviceOverview {
        let states = self.actuator_states();
        let actuators = self
            .registry
            .actuators()
            .iter()
            .map(|device| ActuatorView {
                state: states
                    .get(&device.id)
                    .copied()
                    .unwrap_or_else(|| ActuatorState::initial(device.initial_status)),
                device: device.clone(),
            })
            .collect();
        DeviceOverview {
            sensors: self.registry.sensors().to_vec(),
            actuators,
        }
    }
}

impl Default for ClassroomState {
    fn default() -> Self {
        Self::new(Registry::classroom(), Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classroom_domain::device::{ActuatorStatus, CURTAIN, FAN};
    use classroom_domain::directive::{Command, CurtainCommand, Power};
    use classroom_domain::sensor::SensorKind;

    #[test]
    fn should_start_with_initial_snapshot_and_statuses() {
        let state = ClassroomState::default();
        assert_eq!(state.snapshot().get(SensorKind::Co2), Some(800.0));
        assert_eq!(state.mode(), Mode::Auto);

        let actuators = state.actuator_states();
        assert_eq!(actuators.len(), 4);
        assert_eq!(
            actuators[&DeviceId::from_static(CURTAIN)].status,
            ActuatorStatus::Closed
        );
    }

    #[test]
    fn should_apply_directive_to_named_actuator() {
        let state = ClassroomState::default();
        let applied = state
            .apply(&Directive::new(
                CURTAIN,
                Command::Curtain(CurtainCommand::Open),
                "more daylight needed",
            ))
            .unwrap();
        assert_eq!(applied.status, ActuatorStatus::Open);
        assert!(applied.last_changed.is_some());
        assert_eq!(
            state.actuator_states()[&DeviceId::from_static(CURTAIN)].status,
            ActuatorStatus::Open
        );
    }

    #[test]
    fn should_reject_directive_for_unknown_actuator() {
        let state = ClassroomState::default();
        let err = state
            .apply(&Directive::new(
                "projector1",
                Command::Light(Power::On),
                "test",
            ))
            .unwrap_err();
        assert_eq!(err.id, "projector1");
    }

    #[test]
    fn should_return_previous_mode_when_set() {
        let state = ClassroomState::default();
        assert_eq!(state.set_mode(Mode::Exam), Mode::Auto);
        assert_eq!(state.mode(), Mode::Exam);
    }

    #[test]
    fn should_replace_snapshot() {
        let state = ClassroomState::default();
        let snapshot = SensorSnapshot::builder()
            .reading(SensorKind::Co2, 1234.0)
            .build();
        state.replace_snapshot(snapshot.clone());
        assert_eq!(state.snapshot(), snapshot);
    }

    #[test]
    fn should_join_registry_with_states_in_overview() {
        let state = ClassroomState::default();
        state
            .apply(&Directive::new(FAN, Command::Fan(Power::On), "test"))
            .unwrap();
        let overview = state.overview();
        assert_eq!(overview.sensors.len(), 5);
        let fan = overview
            .actuators
            .iter()
            .find(|a| a.device.id == *FAN)
            .unwrap();
        assert_eq!(fan.state.status, ActuatorStatus::On);
    }
}
