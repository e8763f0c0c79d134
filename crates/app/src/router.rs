//! Event router: classifies device events into activation events.
//!
//! An event is routed only when the source id, the event kind and the
//! component key all match the configured virtual button. Everything else
//! is ignored without error.

use armplug_domain::config::ControllerConfig;
use armplug_domain::event::{ActivationEvent, InboundEvent};
use armplug_domain::id::ButtonId;

/// Pure classifier over [`InboundEvent`]s. Holds no state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRouter {
    button: ButtonId,
    component: String,
    toggle_event: String,
    fire_event: String,
}

impl EventRouter {
    /// Create a router for `button`, mapping `toggle_event` and `fire_event`.
    #[must_use]
    pub fn new(
        button: ButtonId,
        toggle_event: impl Into<String>,
        fire_event: impl Into<String>,
    ) -> Self {
        Self {
            button,
            component: button.component_key(),
            toggle_event: toggle_event.into(),
            fire_event: fire_event.into(),
        }
    }

    /// Create a router from the controller configuration.
    #[must_use]
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(
            config.button_id,
            config.toggle_event.clone(),
            config.fire_event.clone(),
        )
    }

    /// Classify an event; `None` means the event is not ours.
    #[must_use]
    pub fn classify(&self, event: &InboundEvent) -> Option<ActivationEvent> {
        if event.source_id != Some(self.button.get()) || event.info.component != self.component {
            return None;
        }

        if event.info.event == self.toggle_event {
            Some(ActivationEvent::ToggleRequested)
        } else if event.info.event == self.fire_event {
            Some(ActivationEvent::FireRequested)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armplug_domain::event::{EventInfo, SINGLE_PUSH, TRIPLE_PUSH};

    fn router() -> EventRouter {
        EventRouter::from_config(&ControllerConfig::default())
    }

    fn event(source_id: Option<u32>, kind: &str, component: &str) -> InboundEvent {
        InboundEvent {
            source_id,
            info: EventInfo {
                event: kind.to_string(),
                component: component.to_string(),
            },
        }
    }

    #[test]
    fn should_route_single_push_to_toggle() {
        let ev = event(Some(200), SINGLE_PUSH, "button:200");
        assert_eq!(router().classify(&ev), Some(ActivationEvent::ToggleRequested));
    }

    #[test]
    fn should_route_triple_push_to_fire() {
        let ev = event(Some(200), TRIPLE_PUSH, "button:200");
        assert_eq!(router().classify(&ev), Some(ActivationEvent::FireRequested));
    }

    #[test]
    fn should_ignore_event_from_other_source_id() {
        let ev = event(Some(201), SINGLE_PUSH, "button:200");
        assert_eq!(router().classify(&ev), None);
    }

    #[test]
    fn should_ignore_event_without_source_id() {
        let ev = event(None, TRIPLE_PUSH, "button:200");
        assert_eq!(router().classify(&ev), None);
    }

    #[test]
    fn should_ignore_event_from_other_component() {
        let ev = event(Some(200), SINGLE_PUSH, "boolean:200");
        assert_eq!(router().classify(&ev), None);
    }

    #[test]
    fn should_ignore_unrelated_event_kind() {
        for kind in ["double_push", "long_push", "btn_down"] {
            let ev = event(Some(200), kind, "button:200");
            assert_eq!(router().classify(&ev), None, "{kind} should be ignored");
        }
    }

    #[test]
    fn should_honour_custom_button_and_event_kinds() {
        let router = EventRouter::new(ButtonId::new(5), "double_push", "long_push");
        let toggle = InboundEvent::button_push(ButtonId::new(5), "double_push");
        let fire = InboundEvent::button_push(ButtonId::new(5), "long_push");
        assert_eq!(router.classify(&toggle), Some(ActivationEvent::ToggleRequested));
        assert_eq!(router.classify(&fire), Some(ActivationEvent::FireRequested));
        let default_press = InboundEvent::button_push(ButtonId::new(5), SINGLE_PUSH);
        assert_eq!(router.classify(&default_press), None);
    }
}
