//! JSON handler for the persisted arm state.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use armplug_app::ports::{EventPublisher, ScheduleRepository, TriggerStateStore};
use armplug_domain::trigger::TriggerState;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for the trigger endpoint.
#[derive(Debug, Serialize)]
pub struct TriggerView {
    pub state: TriggerState,
    pub armed: bool,
}

impl From<TriggerState> for TriggerView {
    fn from(state: TriggerState) -> Self {
        Self {
            state,
            armed: state.is_armed(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<TriggerView>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/trigger`
pub async fn get<S, R, P>(State(state): State<AppState<S, R, P>>) -> Result<GetResponse, ApiError>
where
    S: TriggerStateStore + Send + Sync + 'static,
    R: ScheduleRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let current = state.trigger.get_state().await?;
    Ok(GetResponse::Ok(Json(current.into())))
}

#[cfg(test)]
mod tests {
    use crate::router::build;
    use crate::testing::{StubSchedules, StubTrigger, state_with, test_state};
    use armplug_domain::trigger::TriggerState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    fn get_trigger() -> Request<Body> {
        Request::builder()
            .uri("/api/trigger")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn should_report_disarmed_when_nothing_was_armed() {
        let response = build(test_state()).oneshot(get_trigger()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["state"], "disarmed");
        assert_eq!(json["armed"], false);
    }

    #[tokio::test]
    async fn should_report_armed_when_store_is_armed() {
        let trigger = StubTrigger {
            state: Mutex::new(TriggerState::Armed),
            unreachable: false,
        };
        let app = build(state_with(trigger, StubSchedules::default()));

        let response = app.oneshot(get_trigger()).await.unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["state"], "armed");
        assert_eq!(json["armed"], true);
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_store_is_unreachable() {
        let trigger = StubTrigger {
            unreachable: true,
            ..StubTrigger::default()
        };
        let app = build(state_with(trigger, StubSchedules::default()));

        let response = app.oneshot(get_trigger()).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "failed to read trigger state");
    }
}
