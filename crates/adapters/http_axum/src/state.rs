//! Shared application state for axum handlers.

use std::sync::Arc;

use armplug_app::ports::{EventPublisher, ScheduleRepository, TriggerStateStore};
use armplug_domain::config::ControllerConfig;
use armplug_domain::id::ButtonId;

/// Application state shared across all axum handlers.
///
/// Generic over the port implementations to avoid dynamic dispatch.
/// `Clone` is implemented manually so the ports themselves do not need to
/// be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S, R, P> {
    /// Persisted arm state.
    pub trigger: Arc<S>,
    /// The device's job table.
    pub schedules: Arc<R>,
    /// Feed that button presses are injected into.
    pub events: Arc<P>,
    /// The virtual button a press is attributed to.
    pub button: ButtonId,
    /// Provenance tag identifying the controller's own job.
    pub origin: Arc<str>,
}

impl<S, R, P> Clone for AppState<S, R, P> {
    fn clone(&self) -> Self {
        Self {
            trigger: Arc::clone(&self.trigger),
            schedules: Arc::clone(&self.schedules),
            events: Arc::clone(&self.events),
            button: self.button,
            origin: Arc::clone(&self.origin),
        }
    }
}

impl<S, R, P> AppState<S, R, P>
where
    S: TriggerStateStore + Send + Sync + 'static,
    R: ScheduleRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from port instances.
    pub fn new(trigger: S, schedules: R, events: P, button: ButtonId, origin: &str) -> Self {
        Self::from_arcs(
            Arc::new(trigger),
            Arc::new(schedules),
            Arc::new(events),
            button,
            origin,
        )
    }

    /// Create a new application state from pre-wrapped `Arc` ports.
    ///
    /// Use this when the ports are shared with the controller.
    pub fn from_arcs(
        trigger: Arc<S>,
        schedules: Arc<R>,
        events: Arc<P>,
        button: ButtonId,
        origin: &str,
    ) -> Self {
        Self {
            trigger,
            schedules,
            events,
            button,
            origin: Arc::from(origin),
        }
    }

    /// Like [`from_arcs`](Self::from_arcs), taking the button and tag from
    /// the controller configuration.
    pub fn from_config(
        config: &ControllerConfig,
        trigger: Arc<S>,
        schedules: Arc<R>,
        events: Arc<P>,
    ) -> Self {
        Self::from_arcs(trigger, schedules, events, config.button_id, &config.origin)
    }
}
