//! Event feed port: publish device notifications to the controller.

use std::future::Future;

use armplug_domain::error::ArmPlugError;
use armplug_domain::event::InboundEvent;

/// Publishes device events to the controller's feed.
pub trait EventPublisher {
    /// Queue an event for the controller.
    fn publish(&self, event: InboundEvent)
    -> impl Future<Output = Result<(), ArmPlugError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: InboundEvent,
    ) -> impl Future<Output = Result<(), ArmPlugError>> + Send {
        (**self).publish(event)
    }
}
