//! JSON handlers for sensor and control history.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use classroom_app::ports::{ControlLog, SensorLog};
use classroom_domain::error::ValidationError;
use classroom_domain::history::{ControlRecord, SensorReading, SensorSummary};
use classroom_domain::sensor::SensorKind;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /api/history`.
#[derive(Deserialize)]
pub struct ReadingsQuery {
    pub sensor: Option<String>,
    pub limit: Option<usize>,
}

/// Query parameters for `GET /api/history/control`.
#[derive(Deserialize)]
pub struct CommandsQuery {
    pub limit: Option<usize>,
}

/// Query parameters for `GET /api/summary`.
#[derive(Deserialize)]
pub struct SummaryQuery {
    /// `YYYY-MM-DD`; today (UTC) when omitted.
    pub date: Option<String>,
}

/// Body of the history list endpoints.
#[derive(Serialize)]
pub struct HistoryBody<T> {
    pub success: bool,
    pub data: Vec<T>,
}

/// Body of `GET /api/summary`.
#[derive(Serialize)]
pub struct SummaryBody {
    pub success: bool,
    pub date: NaiveDate,
    pub data: Vec<SensorSummary>,
}

/// Possible responses from the readings endpoint.
pub enum ReadingsResponse {
    Ok(Json<HistoryBody<SensorReading>>),
}

impl IntoResponse for ReadingsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the commands endpoint.
pub enum CommandsResponse {
    Ok(Json<HistoryBody<ControlRecord>>),
}

impl IntoResponse for CommandsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the summary endpoint.
pub enum SummaryResponse {
    Ok(Json<SummaryBody>),
}

impl IntoResponse for SummaryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/history`
pub async fn readings<SL, CL>(
    State(state): State<AppState<SL, CL>>,
    query: Result<Query<ReadingsQuery>, QueryRejection>,
) -> Result<ReadingsResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    let Query(query) = query?;
    let sensor = query
        .sensor
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(SensorKind::from_str)
        .transpose()?;

    let data = state
        .history_service
        .recent_readings(sensor, query.limit)
        .await?;
    Ok(ReadingsResponse::Ok(Json(HistoryBody {
        success: true,
        data,
    })))
}

/// `GET /api/history/control`
pub async fn commands<SL, CL>(
    State(state): State<AppState<SL, CL>>,
    query: Result<Query<CommandsQuery>, QueryRejection>,
) -> Result<CommandsResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    let Query(query) = query?;
    let data = state.history_service.recent_commands(query.limit).await?;
    Ok(CommandsResponse::Ok(Json(HistoryBody {
        success: true,
        data,
    })))
}

/// `GET /api/summary`
pub async fn summary<SL, CL>(
    State(state): State<AppState<SL, CL>>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<SummaryResponse, ApiError>
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    let Query(query) = query?;
    let date = query
        .date
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidDate(s.to_string()))
        })
        .transpose()?;

    let (date, data) = state.history_service.daily_summary(date).await?;
    Ok(SummaryResponse::Ok(Json(SummaryBody {
        success: true,
        date,
        data,
    })))
}
