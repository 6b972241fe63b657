//! JSON handlers for the active scene mode and the directive preview.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use classroom_app::ports::{ControlLog, SensorLog};
use classroom_domain::directive::Directive;
use classroom_domain::mode::Mode;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/scene`.
#[derive(Deserialize)]
pub struct SceneRequest {
    /// Scene name; automatic mode when omitted.
    #[serde(default)]
    pub scene: Option<String>,
}

/// Body of `GET /api/scene`.
#[derive(Serialize)]
pub struct SceneBody {
    pub success: bool,
    pub scene: Mode,
}

/// Body returned after a scene change.
#[derive(Serialize)]
pub struct SceneChangedBody {
    pub success: bool,
    pub message: String,
    pub scene: Mode,
    /// Directives applied as the scene took effect.
    pub directives: Vec<Directive>,
}

/// Body of `GET /api/directives`.
#[derive(Serialize)]
pub struct PreviewBody {
    pub success: bool,
    pub mode: Mode,
    pub directives: Vec<Directive>,
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<SceneBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the set endpoint.
pub enum SetResponse {
    Ok(Json<SceneChangedBody>),
}

impl IntoResponse for SetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the preview endpoint.
pub enum PreviewResponse {
    Ok(Json<PreviewBody>),
}

impl IntoResponse for PreviewResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/scene`
pub async fn get<SL, CL>(State(state): State<AppState<SL, CL>>) -> Result<GetResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    Ok(GetResponse::Ok(Json(SceneBody {
        success: true,
        scene: state.control_service.mode(),
    })))
}

/// `POST /api/scene`
pub async fn set<SL, CL>(
    State(state): State<AppState<SL, CL>>,
    payload: Result<Json<SceneRequest>, JsonRejection>,
) -> Result<SetResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let mode = match req.scene.as_deref() {
        Some(name) => Mode::from_str(name)?,
        None => Mode::Auto,
    };

    let directives = state.control_service.set_mode(mode).await?;

    Ok(SetResponse::Ok(Json(SceneChangedBody {
        success: true,
        message: format!("switched to {}", mode.label()),
        scene: mode,
        directives,
    })))
}

/// `GET /api/directives`
pub async fn preview<SL, CL>(
    State(state): State<AppState<SL, CL>>,
) -> Result<PreviewResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    Ok(PreviewResponse::Ok(Json(PreviewBody {
        success: true,
        mode: state.control_service.mode(),
        directives: state.control_service.preview(),
    })))
}
