//! JSON handler for manual actuator control.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use classroom_app::ports::{ControlLog, SensorLog};
use classroom_app::services::control_service::ManualCommand;
use classroom_domain::directive::{Action, Directive};
use classroom_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/control`.
#[derive(Deserialize)]
pub struct ControlRequest {
    pub device_id: String,
    pub command: String,
    pub reason: Option<String>,
    /// Target temperature, only for turning the AC on.
    pub temperature: Option<f64>,
}

/// Body returned once the command has been applied.
#[derive(Serialize)]
pub struct ControlBody {
    pub success: bool,
    pub message: String,
    pub device_id: DeviceId,
    pub command: String,
    pub directive: Directive,
}

/// Possible responses from the execute endpoint.
pub enum ExecuteResponse {
    Ok(Json<ControlBody>),
}

impl IntoResponse for ExecuteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/control`
pub async fn execute<SL, CL>(
    State(state): State<AppState<SL, CL>>,
    payload: Result<Json<ControlRequest>, JsonRejection>,
) -> Result<ExecuteResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let command = ManualCommand {
        device_id: DeviceId::from_str(&req.device_id)?,
        action: Action::from_str(&req.command)?,
        target_temperature: req.temperature,
        reason: req.reason,
    };

    let directive = state.control_service.manual_control(command).await?;
    let action = directive.action();

    Ok(ExecuteResponse::Ok(Json(ControlBody {
        success: true,
        message: format!("device {} executed {action}", directive.device),
        device_id: directive.device.clone(),
        command: action.to_string(),
        directive,
    })))
}
