//! Simulated components: virtual buttons and booleans plus switched outputs.
//!
//! Virtual components are addressed by `(kind, id)`; a button and a boolean
//! may share the same numeric id. Switches are fixed hardware and exist
//! from construction.

mod boolean;
mod switch;

pub use boolean::VirtualBoolean;
pub use switch::VirtualSwitch;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use armplug_domain::component::{ComponentConfig, ComponentKind, VirtualComponent};

/// All components of a simulated device.
#[derive(Debug, Default)]
pub struct Components {
    buttons: BTreeMap<u32, ComponentConfig>,
    booleans: BTreeMap<u32, VirtualBoolean>,
    switches: BTreeMap<u32, VirtualSwitch>,
}

impl Components {
    /// Install a switched output at `id`, replacing any previous one.
    pub fn install_switch(&mut self, id: u32) {
        self.switches.insert(id, VirtualSwitch::default());
    }

    /// Add a virtual component. Returns `false` when the slot is taken.
    pub fn add(&mut self, component: VirtualComponent) -> bool {
        match component.kind {
            ComponentKind::Button => match self.buttons.entry(component.id) {
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(component.config);
                    true
                }
            },
            ComponentKind::Boolean => match self.booleans.entry(component.id) {
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(VirtualBoolean::new(component.config));
                    true
                }
            },
        }
    }

    #[must_use]
    pub fn config(&self, kind: ComponentKind, id: u32) -> Option<&ComponentConfig> {
        match kind {
            ComponentKind::Button => self.buttons.get(&id),
            ComponentKind::Boolean => self.booleans.get(&id).map(VirtualBoolean::config),
        }
    }

    /// Replace a component's configuration. Returns `false` when it does not exist.
    pub fn set_config(&mut self, kind: ComponentKind, id: u32, config: ComponentConfig) -> bool {
        match kind {
            ComponentKind::Button => match self.buttons.get_mut(&id) {
                Some(existing) => {
                    *existing = config;
                    true
                }
                None => false,
            },
            ComponentKind::Boolean => match self.booleans.get_mut(&id) {
                Some(boolean) => {
                    boolean.set_config(config);
                    true
                }
                None => false,
            },
        }
    }

    #[must_use]
    pub fn has_button(&self, id: u32) -> bool {
        self.buttons.contains_key(&id)
    }

    #[must_use]
    pub fn boolean(&self, id: u32) -> Option<&VirtualBoolean> {
        self.booleans.get(&id)
    }

    pub fn boolean_mut(&mut self, id: u32) -> Option<&mut VirtualBoolean> {
        self.booleans.get_mut(&id)
    }

    #[must_use]
    pub fn switch(&self, id: u32) -> Option<&VirtualSwitch> {
        self.switches.get(&id)
    }

    pub fn switch_mut(&mut self, id: u32) -> Option<&mut VirtualSwitch> {
        self.switches.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armplug_domain::id::{BooleanId, ButtonId};

    #[test]
    fn should_keep_buttons_and_booleans_apart() {
        let mut components = Components::default();
        assert!(components.add(VirtualComponent::trigger_button(ButtonId::new(200), "b")));
        assert!(components.add(VirtualComponent::trigger_boolean(BooleanId::new(200), "v")));

        assert_eq!(components.config(ComponentKind::Button, 200).unwrap().name, "b");
        assert_eq!(components.config(ComponentKind::Boolean, 200).unwrap().name, "v");
    }

    #[test]
    fn should_refuse_to_add_twice() {
        let mut components = Components::default();
        let button = VirtualComponent::trigger_button(ButtonId::new(1), "b");
        assert!(components.add(button.clone()));
        assert!(!components.add(button));
    }

    #[test]
    fn should_not_set_config_of_missing_component() {
        let mut components = Components::default();
        let boolean = VirtualComponent::trigger_boolean(BooleanId::new(3), "v");
        assert!(!components.set_config(ComponentKind::Boolean, 3, boolean.config));
    }

    #[test]
    fn should_only_know_installed_switches() {
        let mut components = Components::default();
        components.install_switch(0);
        assert!(components.switch(0).is_some());
        assert!(components.switch(1).is_none());
    }
}
