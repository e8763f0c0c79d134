//! Events: what the device reports, and what the controller acts on.
//!
//! [`InboundEvent`] is the raw notification pushed by the device event
//! feed. The router classifies it into an [`ActivationEvent`], which is the
//! only input the activation state machine understands.

use serde::{Deserialize, Serialize};

use crate::id::ButtonId;

/// Button event kind emitted by a single press.
pub const SINGLE_PUSH: &str = "single_push";

/// Button event kind emitted by a triple press.
pub const TRIPLE_PUSH: &str = "triple_push";

/// A notification delivered by the device event feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Numeric id of the emitting component, when it has one.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<u32>,
    pub info: EventInfo,
}

/// Payload of an [`InboundEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// Event kind, e.g. `single_push`.
    pub event: String,
    /// Component key of the emitter, e.g. `button:200`.
    pub component: String,
}

impl InboundEvent {
    /// The event a press of `button` produces.
    #[must_use]
    pub fn button_push(button: ButtonId, event: impl Into<String>) -> Self {
        Self {
            source_id: Some(button.get()),
            info: EventInfo {
                event: event.into(),
                component: button.component_key(),
            },
        }
    }
}

/// A classified signal for the activation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationEvent {
    /// Arm/disarm was requested (manual press of the virtual button).
    ToggleRequested,
    /// The scheduled activation window has started.
    FireRequested,
}

impl std::fmt::Display for ActivationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToggleRequested => f.write_str("toggle_requested"),
            Self::FireRequested => f.write_str("fire_requested"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_button_push_with_component_key() {
        let event = InboundEvent::button_push(ButtonId::new(200), SINGLE_PUSH);
        assert_eq!(event.source_id, Some(200));
        assert_eq!(event.info.event, "single_push");
        assert_eq!(event.info.component, "button:200");
    }

    #[test]
    fn should_deserialize_device_notification() {
        let json = serde_json::json!({
            "component": "button:200",
            "id": 200,
            "event": "triple_push",
            "info": {"component": "button:200", "id": 200, "event": "triple_push", "ts": 1.0}
        });
        let event: InboundEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event, InboundEvent::button_push(ButtonId::new(200), TRIPLE_PUSH));
    }

    #[test]
    fn should_deserialize_notification_without_source_id() {
        let json = serde_json::json!({
            "info": {"component": "sys", "event": "scheduled_restart"}
        });
        let event: InboundEvent = serde_json::from_value(json).unwrap();
        assert!(event.source_id.is_none());
    }

    #[test]
    fn should_display_activation_events_in_snake_case() {
        assert_eq!(ActivationEvent::ToggleRequested.to_string(), "toggle_requested");
        assert_eq!(ActivationEvent::FireRequested.to_string(), "fire_requested");
    }
}
