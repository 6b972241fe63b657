//! JSON handler for the device listing.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use classroom_app::ports::{ControlLog, SensorLog};
use classroom_domain::device::DeviceOverview;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /api/devices`.
#[derive(Serialize)]
pub struct DevicesBody {
    pub success: bool,
    pub devices: DeviceOverview,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<DevicesBody>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<SL, CL>(State(state): State<AppState<SL, CL>>) -> Result<ListResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    Ok(ListResponse::Ok(Json(DevicesBody {
        success: true,
        devices: state.control_service.devices(),
    })))
}
