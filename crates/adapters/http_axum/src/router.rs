//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use classroom_app::ports::{ControlLog, SensorLog};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api` next to a plain `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<SL, CL>(state: AppState<SL, CL>) -> Router
where
    SL: SensorLog + Send + Sync + 'static,
    CL: ControlLog + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::NaiveDate;
    use classroom_app::services::control_service::ControlService;
    use classroom_app::services::history_service::HistoryService;
    use classroom_app::state::ClassroomState;
    use classroom_domain::device::{ActuatorStatus, FAN};
    use classroom_domain::error::ClassroomError;
    use classroom_domain::history::{ControlRecord, SensorReading, SensorSummary};
    use classroom_domain::id::DeviceId;
    use classroom_domain::mode::Mode;
    use classroom_domain::sensor::{Occupancy, SensorKind, SensorSnapshot};
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubSensorLog {
        last_query: Mutex<Option<(Option<SensorKind>, usize)>>,
    }

    #[derive(Default)]
    struct StubControlLog {
        records: Mutex<Vec<ControlRecord>>,
    }

    impl SensorLog for StubSensorLog {
        async fn append(&self, _readings: Vec<SensorReading>) -> Result<(), ClassroomError> {
            Ok(())
        }
        async fn recent(
            &self,
            sensor: Option<SensorKind>,
            limit: usize,
        ) -> Result<Vec<SensorReading>, ClassroomError> {
            *self.last_query.lock().unwrap() = Some((sensor, limit));
            Ok(vec![
                SensorReading::builder(DeviceId::from_static("temp1"), SensorKind::Temperature, 23.5)
                    .build(),
            ])
        }
        async fn daily_summary(&self, date: NaiveDate) -> Result<Vec<SensorSummary>, ClassroomError> {
            Ok(vec![SensorSummary {
                date,
                sensor: SensorKind::Co2,
                count: 3,
                avg: 900.0,
                min: 700.0,
                max: 1100.0,
            }])
        }
    }

    impl ControlLog for StubControlLog {
        async fn append(&self, records: Vec<ControlRecord>) -> Result<(), ClassroomError> {
            self.records.lock().unwrap().extend(records);
            Ok(())
        }
        async fn recent(&self, limit: usize) -> Result<Vec<ControlRecord>, ClassroomError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .rev()
                .take(limit)
                .cloned()
                .collect())
        }
    }

    struct Fixture {
        state: AppState<Arc<StubSensorLog>, Arc<StubControlLog>>,
        sensor_log: Arc<StubSensorLog>,
        control_log: Arc<StubControlLog>,
    }

    fn fixture() -> Fixture {
        let sensor_log = Arc::new(StubSensorLog::default());
        let control_log = Arc::new(StubControlLog::default());
        let classroom = Arc::new(ClassroomState::default());
        let state = AppState::new(
            ControlService::new(classroom, Arc::clone(&control_log)),
            HistoryService::new(Arc::clone(&sensor_log), Arc::clone(&control_log)),
        );
        Fixture {
            state,
            sensor_log,
            control_log,
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(fixture().state);

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_current_snapshot() {
        let fx = fixture();
        fx.state.control_service.state().replace_snapshot(
            SensorSnapshot::builder()
                .reading(SensorKind::Light, 640.0)
                .occupancy(Occupancy::Present)
                .build(),
        );

        let (status, body) = send(build(fx.state), get("/api/sensor_data")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["light"], 640.0);
        assert_eq!(body["data"]["occupancy"], 1.0);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn should_list_devices_with_status() {
        let (status, body) = send(build(fixture().state), get("/api/devices")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["devices"]["sensors"].as_array().unwrap().len(), 5);
        let actuators = body["devices"]["actuators"].as_array().unwrap();
        assert_eq!(actuators.len(), 4);
        let curtain = actuators.iter().find(|a| a["id"] == "curtain1").unwrap();
        assert_eq!(curtain["status"], "closed");
        assert_eq!(curtain["type"], "curtain");
    }

    #[tokio::test]
    async fn should_apply_manual_control() {
        let fx = fixture();
        let classroom = Arc::clone(fx.state.control_service.state());
        let control_log = Arc::clone(&fx.control_log);

        let (status, body) = send(
            build(fx.state),
            post_json(
                "/api/control",
                &serde_json::json!({"device_id": "fan1", "command": "on"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["device_id"], "fan1");
        assert_eq!(body["command"], "on");
        assert_eq!(
            classroom.actuator_states()[&DeviceId::from_static(FAN)].status,
            ActuatorStatus::On
        );
        let records = control_log.records.lock().unwrap();
        assert_eq!(records[0].reason, "manual control");
    }

    #[tokio::test]
    async fn should_reject_unsupported_command_with_400() {
        let fx = fixture();
        let control_log = Arc::clone(&fx.control_log);

        let (status, body) = send(
            build(fx.state),
            post_json(
                "/api/control",
                &serde_json::json!({"device_id": "curtain1", "command": "on"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "device curtain1 does not support on");
        assert!(control_log.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_device() {
        let (status, body) = send(
            build(fixture().state),
            post_json(
                "/api/control",
                &serde_json::json!({"device_id": "projector1", "command": "on"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn should_reject_malformed_body_with_structured_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/control")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(build(fixture().state), request).await;

        assert!(status.is_client_error());
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn should_switch_scene_and_return_applied_directives() {
        let fx = fixture();
        let classroom = Arc::clone(fx.state.control_service.state());

        let (status, body) = send(
            build(fx.state),
            post_json("/api/scene", &serde_json::json!({"scene": "lecture"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scene"], "lecture");
        assert_eq!(body["message"], "switched to lecture mode");
        assert_eq!(body["directives"].as_array().unwrap().len(), 2);
        assert_eq!(classroom.mode(), Mode::Lecture);
    }

    #[tokio::test]
    async fn should_default_scene_to_auto() {
        let fx = fixture();
        fx.state.control_service.state().set_mode(Mode::Exam);
        let app = build(fx.state);

        let (status, body) =
            send(app.clone(), post_json("/api/scene", &serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scene"], "auto");

        let (_, body) = send(app, get("/api/scene")).await;
        assert_eq!(body["scene"], "auto");
    }

    #[tokio::test]
    async fn should_reject_unknown_scene() {
        let (status, body) = send(
            build(fixture().state),
            post_json("/api/scene", &serde_json::json!({"scene": "party"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown scene mode: party");
    }

    #[tokio::test]
    async fn should_preview_directives_for_current_mode() {
        let fx = fixture();
        fx.state.control_service.state().replace_snapshot(
            SensorSnapshot::builder()
                .reading(SensorKind::Co2, 1300.0)
                .build(),
        );

        let (status, body) = send(build(fx.state), get("/api/directives")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "auto");
        let directives = body["directives"].as_array().unwrap();
        assert!(
            directives
                .iter()
                .any(|d| d["device"] == "fan1" && d["action"] == "on")
        );
    }

    #[tokio::test]
    async fn should_pass_sensor_filter_and_limit_to_history() {
        let fx = fixture();
        let sensor_log = Arc::clone(&fx.sensor_log);

        let (status, body) = send(
            build(fx.state),
            get("/api/history?sensor=temperature&limit=5"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["sensor"], "temperature");
        assert_eq!(
            *sensor_log.last_query.lock().unwrap(),
            Some((Some(SensorKind::Temperature), 5))
        );
    }

    #[tokio::test]
    async fn should_reject_unknown_sensor_filter() {
        let (status, body) =
            send(build(fixture().state), get("/api/history?sensor=noise")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn should_reject_non_numeric_limit() {
        let (status, body) =
            send(build(fixture().state), get("/api/history/control?limit=lots")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn should_summarise_requested_date() {
        let (status, body) = send(
            build(fixture().state),
            get("/api/summary?date=2024-03-14"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2024-03-14");
        assert_eq!(body["data"][0]["sensor"], "co2");
        assert_eq!(body["data"][0]["count"], 3);
    }

    #[tokio::test]
    async fn should_reject_malformed_date() {
        let (status, body) =
            send(build(fixture().state), get("/api/summary?date=14/03/2024")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid date: 14/03/2024");
    }
}
