//! Controller configuration: immutable after startup.
//!
//! Everything the controller addresses on the device is named here: the
//! virtual button and boolean, the switched output, the fire schedule and
//! the provenance tag marking the job this system owns.

use crate::component::VirtualComponent;
use crate::error::{ArmPlugError, ValidationError};
use crate::event::{SINGLE_PUSH, TRIPLE_PUSH};
use crate::id::{BooleanId, ButtonId, SwitchId};
use crate::schedule::{JobSpec, Timespec};
use crate::time_window::WindowPolicy;

pub const DEFAULT_BUTTON_ID: ButtonId = ButtonId::new(200);
pub const DEFAULT_BUTTON_NAME: &str = "arm-timer-button";
pub const DEFAULT_TRIGGER_ID: BooleanId = BooleanId::new(200);
pub const DEFAULT_TRIGGER_NAME: &str = "timer-armed-boolean";
pub const DEFAULT_SWITCH_ID: SwitchId = SwitchId::new(0);
pub const DEFAULT_TIMESPEC: &str = "0 0 23 * * 1,2,3,4,5";
pub const DEFAULT_ORIGIN: &str = "generated-switch-timer-cron";

/// Validated controller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub button_id: ButtonId,
    pub button_name: String,
    pub trigger_id: BooleanId,
    pub trigger_name: String,
    pub switch_id: SwitchId,
    pub timespec: Timespec,
    pub origin: String,
    pub toggle_event: String,
    pub fire_event: String,
    pub window: WindowPolicy,
}

impl ControllerConfig {
    /// Create a builder pre-filled with the defaults.
    #[must_use]
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ArmPlugError::Validation`] when a name, the origin or an
    /// event kind is empty, or when toggle and fire share an event kind.
    pub fn validate(&self) -> Result<(), ArmPlugError> {
        if self.button_name.is_empty() || self.trigger_name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.origin.is_empty() {
            return Err(ValidationError::EmptyOrigin.into());
        }
        if self.toggle_event.is_empty() || self.fire_event.is_empty() {
            return Err(ValidationError::EmptyEventKind.into());
        }
        if self.toggle_event == self.fire_event {
            return Err(ValidationError::AmbiguousEvents(self.toggle_event.clone()).into());
        }
        Ok(())
    }

    /// The job that presses the button with the fire event on schedule.
    #[must_use]
    pub fn fire_job(&self) -> JobSpec {
        JobSpec::button_trigger(
            self.timespec.clone(),
            self.button_id,
            &self.fire_event,
            &self.origin,
        )
    }

    /// The virtual button and boolean, in provisioning order.
    #[must_use]
    pub fn trigger_components(&self) -> [VirtualComponent; 2] {
        [
            VirtualComponent::trigger_button(self.button_id, self.button_name.clone()),
            VirtualComponent::trigger_boolean(self.trigger_id, self.trigger_name.clone()),
        ]
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            button_id: DEFAULT_BUTTON_ID,
            button_name: DEFAULT_BUTTON_NAME.to_string(),
            trigger_id: DEFAULT_TRIGGER_ID,
            trigger_name: DEFAULT_TRIGGER_NAME.to_string(),
            switch_id: DEFAULT_SWITCH_ID,
            timespec: Timespec::default(),
            origin: DEFAULT_ORIGIN.to_string(),
            toggle_event: SINGLE_PUSH.to_string(),
            fire_event: TRIPLE_PUSH.to_string(),
            window: WindowPolicy::default(),
        }
    }
}

/// Step-by-step builder for [`ControllerConfig`].
#[derive(Debug, Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    #[must_use]
    pub fn button(mut self, id: ButtonId, name: impl Into<String>) -> Self {
        self.config.button_id = id;
        self.config.button_name = name.into();
        self
    }

    #[must_use]
    pub fn trigger(mut self, id: BooleanId, name: impl Into<String>) -> Self {
        self.config.trigger_id = id;
        self.config.trigger_name = name.into();
        self
    }

    #[must_use]
    pub fn switch(mut self, id: SwitchId) -> Self {
        self.config.switch_id = id;
        self
    }

    #[must_use]
    pub fn timespec(mut self, timespec: Timespec) -> Self {
        self.config.timespec = timespec;
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    #[must_use]
    pub fn events(mut self, toggle: impl Into<String>, fire: impl Into<String>) -> Self {
        self.config.toggle_event = toggle.into();
        self.config.fire_event = fire.into();
        self
    }

    #[must_use]
    pub fn window(mut self, window: WindowPolicy) -> Self {
        self.config.window = window;
        self
    }

    /// Consume the builder, validate, and return a [`ControllerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ArmPlugError::Validation`] if an invariant fails.
    pub fn build(self) -> Result<ControllerConfig, ArmPlugError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
