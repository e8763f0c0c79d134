//! Simulated virtual boolean.

use armplug_domain::component::ComponentConfig;

/// A boolean component holding a single value.
///
/// A new boolean starts at its configured `default_value`.
#[derive(Debug, Clone)]
pub struct VirtualBoolean {
    config: ComponentConfig,
    value: bool,
}

impl VirtualBoolean {
    #[must_use]
    pub fn new(config: ComponentConfig) -> Self {
        let value = config.default_value.unwrap_or(false);
        Self { config, value }
    }

    #[must_use]
    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    /// Replace the configuration; the current value is kept.
    pub fn set_config(&mut self, config: ComponentConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set(&mut self, value: bool) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armplug_domain::component::VirtualComponent;
    use armplug_domain::id::BooleanId;

    fn config(default_value: Option<bool>) -> ComponentConfig {
        let mut config =
            VirtualComponent::trigger_boolean(BooleanId::new(200), "timer-armed-boolean").config;
        config.default_value = default_value;
        config
    }

    #[test]
    fn should_start_at_default_value() {
        assert!(!VirtualBoolean::new(config(Some(false))).value());
        assert!(VirtualBoolean::new(config(Some(true))).value());
        assert!(!VirtualBoolean::new(config(None)).value());
    }

    #[test]
    fn should_keep_value_when_config_changes() {
        let mut boolean = VirtualBoolean::new(config(Some(false)));
        boolean.set(true);
        boolean.set_config(config(Some(false)));
        assert!(boolean.value());
    }
}
