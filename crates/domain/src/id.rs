//! Typed identifier newtypes.
//!
//! Component ids are small integers chosen by whoever provisions the
//! component (`button:200`, `boolean:200`, `switch:0`). Job ids are assigned
//! by the device scheduler. [`EventId`] is a local correlation id attached
//! to log spans and never leaves the process.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_component_id {
    ($(#[doc = $doc:expr])* $name:ident, $kind:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Component type prefix used in component keys.
            pub const KIND: &'static str = $kind;

            /// Wrap a raw device id.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Access the raw device id.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Component key as reported by the device, e.g. `button:200`.
            #[must_use]
            pub fn component_key(self) -> String {
                format!("{}:{}", $kind, self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_component_id!(
    /// Identifier of a virtual button component.
    ButtonId,
    "button"
);

define_component_id!(
    /// Identifier of a virtual boolean component.
    BooleanId,
    "boolean"
);

define_component_id!(
    /// Identifier of a switched output.
    SwitchId,
    "switch"
);

/// Identifier of a scheduled job, assigned by the device on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u32);

impl JobId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Correlation id for a single dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(uuid::Uuid);

impl Default for EventId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl EventId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
