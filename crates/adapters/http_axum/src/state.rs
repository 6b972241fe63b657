//! Shared application state for axum handlers.

use std::sync::Arc;

use classroom_app::ports::{ControlLog, SensorLog};
use classroom_app::services::control_service::ControlService;
use classroom_app::services::history_service::HistoryService;

/// Application state shared across all axum handlers.
///
/// Generic over the sensor and control log types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<SL, CL> {
    /// Actuator control, scene changes and the current snapshot.
    pub control_service: Arc<ControlService<CL>>,
    /// Recent readings, commands and daily summaries.
    pub history_service: Arc<HistoryService<SL, CL>>,
}

impl<SL, CL> Clone for AppState<SL, CL> {
    fn clone(&self) -> Self {
        Self {
            control_service: Arc::clone(&self.control_service),
            history_service: Arc::clone(&self.history_service),
        }
    }
}

impl<SL, CL> AppState<SL, CL>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(control_service: ControlService<CL>, history_service: HistoryService<SL, CL>) -> Self {
        Self {
            control_service: Arc::new(control_service),
            history_service: Arc::new(history_service),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when the control service is shared with the monitor loop.
    pub fn from_arcs(
        control_service: Arc<ControlService<CL>>,
        history_service: Arc<HistoryService<SL, CL>>,
    ) -> Self {
        Self {
            control_service,
            history_service,
        }
    }
}
