//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod control;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod history;
#[allow(clippy::missing_errors_doc)]
pub mod scene;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;

use axum::Router;
use axum::routing::{get, post};

use classroom_app::ports::{ControlLog, SensorLog};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<SL, CL>() -> Router<AppState<SL, CL>>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    Router::new()
        // Live state
        .route("/sensor_data", get(sensors::current::<SL, CL>))
        .route("/devices", get(devices::list::<SL, CL>))
        // Control
        .route("/control", post(control::execute::<SL, CL>))
        .route(
            "/scene",
            get(scene::get::<SL, CL>).post(scene::set::<SL, CL>),
        )
        .route("/directives", get(scene::preview::<SL, CL>))
        // History
        .route("/history", get(history::readings::<SL, CL>))
        .route("/history/control", get(history::commands::<SL, CL>))
        .route("/summary", get(history::summary::<SL, CL>))
}
