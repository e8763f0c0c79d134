//! Trigger state: whether the next scheduled fire should power the output.

use serde::{Deserialize, Serialize};

/// The persisted arm state, mirrored by a virtual boolean on the device.
///
/// On the wire `true` means [`Armed`](Self::Armed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerState {
    Armed,
    #[default]
    Disarmed,
}

impl TriggerState {
    /// Map the virtual boolean value to a state.
    #[must_use]
    pub fn from_armed(armed: bool) -> Self {
        if armed { Self::Armed } else { Self::Disarmed }
    }

    /// The virtual boolean value for this state.
    #[must_use]
    pub fn is_armed(self) -> bool {
        matches!(self, Self::Armed)
    }

    /// The opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Armed => Self::Disarmed,
            Self::Disarmed => Self::Armed,
        }
    }
}

impl std::fmt::Display for TriggerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Armed => f.write_str("armed"),
            Self::Disarmed => f.write_str("disarmed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_disarmed() {
        assert_eq!(TriggerState::default(), TriggerState::Disarmed);
    }

    #[test]
    fn should_map_boolean_values() {
        assert_eq!(TriggerState::from_armed(true), TriggerState::Armed);
        assert_eq!(TriggerState::from_armed(false), TriggerState::Disarmed);
        assert!(TriggerState::Armed.is_armed());
        assert!(!TriggerState::Disarmed.is_armed());
    }

    #[test]
    fn should_return_original_state_after_two_toggles() {
        for state in [TriggerState::Armed, TriggerState::Disarmed] {
            assert_ne!(state.toggled(), state);
            assert_eq!(state.toggled().toggled(), state);
        }
    }

    #[test]
    fn should_serialize_lowercase() {
        let json = serde_json::to_string(&TriggerState::Armed).unwrap();
        assert_eq!(json, "\"armed\"");
        assert_eq!(TriggerState::Disarmed.to_string(), "disarmed");
    }
}
