//! In-process event feed: a bounded single-consumer queue.
//!
//! The controller owns the only [`EventFeed`]. Publishers wait for room
//! when the queue is full, so no event is dropped while the feed is open.

use std::future::Future;

use tokio::sync::mpsc;

use armplug_domain::error::ArmPlugError;
use armplug_domain::event::InboundEvent;

use crate::ports::EventPublisher;

/// Receiving half of the feed, consumed by the controller.
pub type EventFeed = mpsc::Receiver<InboundEvent>;

/// Publishing half of the feed. Cloning the bus shares the same queue.
#[derive(Clone)]
pub struct InProcessEventBus {
    sender: mpsc::Sender<InboundEvent>,
}

impl InProcessEventBus {
    /// Create the bus together with its single feed.
    ///
    /// `capacity` events are buffered before `publish` waits on the consumer.
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, EventFeed) {
        let (sender, feed) = mpsc::channel(capacity.max(1));
        (Self { sender }, feed)
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(
        &self,
        event: InboundEvent,
    ) -> impl Future<Output = Result<(), ArmPlugError>> + Send {
        let sender = self.sender.clone();
        async move {
            // Only fails once the feed is gone; the event has nowhere to go.
            if sender.send(event).await.is_err() {
                tracing::debug!("event feed closed, event dropped");
            }
            Ok(())
        }
    }
}
