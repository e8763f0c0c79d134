//! Controller: the single consumer of the device event feed.
//!
//! Every routed event is handled to completion before the next one is
//! received, so toggle and fire never interleave their read and write of
//! the trigger state.

use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Instrument, debug, info, warn};

use armplug_domain::config::ControllerConfig;
use armplug_domain::error::ArmPlugError;
use armplug_domain::event::InboundEvent;
use armplug_domain::id::EventId;

use crate::activation::{ActivationMachine, Outcome};
use crate::event_bus::EventFeed;
use crate::ports::{Clock, PowerActuator, TriggerStateStore};
use crate::router::EventRouter;

/// Routes inbound events and drives the activation state machine.
pub struct Controller<S, A, C> {
    router: EventRouter,
    machine: ActivationMachine<S, A, C>,
}

impl<S, A, C> Controller<S, A, C>
where
    S: TriggerStateStore,
    A: PowerActuator,
    C: Clock,
{
    pub fn new(router: EventRouter, machine: ActivationMachine<S, A, C>) -> Self {
        Self { router, machine }
    }

    /// Wire a controller from configuration and its three ports.
    pub fn from_config(config: &ControllerConfig, store: S, actuator: A, clock: C) -> Self {
        Self::new(
            EventRouter::from_config(config),
            ActivationMachine::new(store, actuator, clock, config.window.clone()),
        )
    }

    /// Route and handle a single event. `Ok(None)` means it was not ours.
    ///
    /// # Errors
    ///
    /// Propagates the state machine's error; the trigger state is unchanged.
    pub async fn dispatch(&self, event: &InboundEvent) -> Result<Option<Outcome>, ArmPlugError> {
        let Some(activation) = self.router.classify(event) else {
            debug!(
                source_id = ?event.source_id,
                component = %event.info.component,
                kind = %event.info.event,
                "ignoring unrelated event"
            );
            return Ok(None);
        };
        self.machine.handle(activation).await.map(Some)
    }

    /// Consume `events` until every publisher is gone.
    ///
    /// Errors are logged and never stop the loop.
    pub async fn run(self, events: EventFeed) {
        let mut stream = ReceiverStream::new(events);
        while let Some(event) = stream.next().await {
            let event_id = EventId::new();
            let span = tracing::info_span!("event", %event_id);
            self.handle_logged(&event).instrument(span).await;
        }
        info!("event feed closed, controller stopped");
    }

    async fn handle_logged(&self, event: &InboundEvent) {
        match self.dispatch(event).await {
            Ok(Some(outcome)) => debug!(?outcome, "event handled"),
            Ok(None) => {}
            Err(err) => {
                let rpc = err.rpc();
                warn!(
                    method = rpc.map(|rpc| rpc.method()),
                    code = ?rpc.and_then(|rpc| rpc.code()),
                    error = %err,
                    "transition aborted"
                );
            }
        }
    }
}
