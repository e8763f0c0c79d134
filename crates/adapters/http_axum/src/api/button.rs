//! JSON handler that injects a press of the virtual button.
//!
//! The press goes into the same event feed the device publishes to, so the
//! controller handles it exactly like a physical `Button.Trigger`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use armplug_app::ports::{EventPublisher, ScheduleRepository, TriggerStateStore};
use armplug_domain::error::{ArmPlugError, ValidationError};
use armplug_domain::event::{InboundEvent, SINGLE_PUSH};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the trigger endpoint.
#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    /// Event kind to emit; a single push when omitted.
    #[serde(default = "default_event")]
    pub event: String,
}

fn default_event() -> String {
    SINGLE_PUSH.to_string()
}

/// Possible responses from the trigger endpoint.
pub enum TriggerResponse {
    Accepted,
}

impl IntoResponse for TriggerResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => StatusCode::ACCEPTED.into_response(),
        }
    }
}

/// `POST /api/button/trigger`
pub async fn trigger<S, R, P>(
    State(state): State<AppState<S, R, P>>,
    Json(req): Json<TriggerRequest>,
) -> Result<TriggerResponse, ApiError>
where
    S: TriggerStateStore + Send + Sync + 'static,
    R: ScheduleRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    if req.event.trim().is_empty() {
        return Err(ArmPlugError::from(ValidationError::EmptyEventKind).into());
    }

    tracing::info!(button = state.button.get(), event = %req.event, "button trigger requested");
    state
        .events
        .publish(InboundEvent::button_push(state.button, req.event))
        .await?;
    Ok(TriggerResponse::Accepted)
}
