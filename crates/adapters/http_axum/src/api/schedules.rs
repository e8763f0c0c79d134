//! JSON handler for the device's scheduled jobs.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use armplug_app::ports::{EventPublisher, ScheduleRepository, TriggerStateStore};
use armplug_domain::schedule::ScheduledJob;

use crate::error::ApiError;
use crate::state::AppState;

/// A listed job, flagged when it is the controller's own fire job.
#[derive(Debug, Serialize)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub job: ScheduledJob,
    pub owned: bool,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ScheduleView>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/schedules`
pub async fn list<S, R, P>(
    State(state): State<AppState<S, R, P>>,
) -> Result<ListResponse, ApiError>
where
    S: TriggerStateStore + Send + Sync + 'static,
    R: ScheduleRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let jobs = state.schedules.list().await?;
    let views = jobs
        .into_iter()
        .map(|job| ScheduleView {
            owned: job.is_owned_by(&state.origin),
            job,
        })
        .collect();
    Ok(ListResponse::Ok(Json(views)))
}

#[cfg(test)]
mod tests {
    use crate::router::build;
    use crate::testing::{ORIGIN, StubSchedules, StubTrigger, state_with};
    use armplug_domain::id::JobId;
    use armplug_domain::schedule::{JobCall, ScheduledJob};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn job(id: u32, origin: Option<&str>) -> ScheduledJob {
        ScheduledJob {
            id: JobId::new(id),
            enable: true,
            timespec: "0 0 23 * * 1,2,3,4,5".to_string(),
            calls: vec![JobCall {
                method: "button.trigger".to_string(),
                params: json!({"event": "triple_push", "id": 200}),
                origin: origin.map(str::to_string),
            }],
        }
    }

    #[tokio::test]
    async fn should_flag_only_the_owned_job() {
        let schedules = StubSchedules {
            jobs: vec![job(1, Some("someone-else")), job(2, Some(ORIGIN))],
        };
        let app = build(state_with(StubTrigger::default(), schedules));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/schedules")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let jobs = json.as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["id"], 1);
        assert_eq!(jobs[0]["owned"], false);
        assert_eq!(jobs[1]["id"], 2);
        assert_eq!(jobs[1]["owned"], true);
        assert_eq!(jobs[1]["timespec"], "0 0 23 * * 1,2,3,4,5");
    }

    #[tokio::test]
    async fn should_return_empty_list_when_device_has_no_jobs() {
        let app = build(state_with(StubTrigger::default(), StubSchedules::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/schedules")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"[]");
    }
}
