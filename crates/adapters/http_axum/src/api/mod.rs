//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod button;
#[allow(clippy::missing_errors_doc)]
pub mod schedules;
#[allow(clippy::missing_errors_doc)]
pub mod trigger;

use axum::Router;
use axum::routing::{get, post};

use armplug_app::ports::{EventPublisher, ScheduleRepository, TriggerStateStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, R, P>() -> Router<AppState<S, R, P>>
where
    S: TriggerStateStore + Send + Sync + 'static,
    R: ScheduleRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/trigger", get(trigger::get::<S, R, P>))
        .route("/schedules", get(schedules::list::<S, R, P>))
        .route("/button/trigger", post(button::trigger::<S, R, P>))
}
