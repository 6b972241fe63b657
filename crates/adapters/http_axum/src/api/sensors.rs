//! JSON handler for the live sensor snapshot.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use classroom_app::ports::{ControlLog, SensorLog};
use classroom_domain::sensor::SensorKind;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /api/sensor_data`.
#[derive(Serialize)]
pub struct SensorDataBody {
    pub success: bool,
    pub data: BTreeMap<SensorKind, f64>,
    /// Capture time of the snapshot, RFC 3339.
    pub timestamp: String,
}

/// Possible responses from the current endpoint.
pub enum CurrentResponse {
    Ok(Json<SensorDataBody>),
}

impl IntoResponse for CurrentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/sensor_data`
pub async fn current<SL, CL>(
    State(state): State<AppState<SL, CL>>,
) -> Result<CurrentResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    let snapshot = state.control_service.current_snapshot();
    Ok(CurrentResponse::Ok(Json(SensorDataBody {
        success: true,
        timestamp: snapshot.captured_at.to_rfc3339(),
        data: snapshot.readings,
    })))
}
