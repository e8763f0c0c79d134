//! Virtual components: the button and boolean the controller relies on.
//!
//! The serialized form of [`VirtualComponent`] is exactly the parameter
//! object the device expects when adding a virtual component.

use serde::{Deserialize, Serialize};

use crate::id::{BooleanId, ButtonId};

/// Kind of virtual component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Button,
    Boolean,
}

impl ComponentKind {
    /// Namespace of the component's RPC methods, e.g. `Button.GetConfig`.
    #[must_use]
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::Boolean => "Boolean",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Button => f.write_str("button"),
            Self::Boolean => f.write_str("boolean"),
        }
    }
}

/// A virtual component to provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualComponent {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub id: u32,
    pub config: ComponentConfig,
}

/// Component configuration, as stored on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<bool>,
    #[serde(default)]
    pub meta: ComponentMeta,
}

/// UI hints attached to a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMeta {
    #[serde(default)]
    pub ui: UiMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiMeta {
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,
}

impl VirtualComponent {
    /// The push button whose presses arm, disarm and fire the trigger.
    #[must_use]
    pub fn trigger_button(id: ButtonId, name: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Button,
            id: id.get(),
            config: ComponentConfig {
                name: name.into(),
                persisted: None,
                default_value: None,
                meta: ComponentMeta {
                    ui: UiMeta {
                        view: "button".to_string(),
                        titles: Vec::new(),
                    },
                },
            },
        }
    }

    /// The persisted boolean that holds the trigger state, disarmed by default.
    #[must_use]
    pub fn trigger_boolean(id: BooleanId, name: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Boolean,
            id: id.get(),
            config: ComponentConfig {
                name: name.into(),
                persisted: Some(true),
                default_value: Some(false),
                meta: ComponentMeta {
                    ui: UiMeta {
                        view: "label".to_string(),
                        titles: vec!["Disarmed".to_string(), "Armed".to_string()],
                    },
                },
            },
        }
    }

    /// Component key, e.g. `boolean:200`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_boolean_as_virtual_add_params() {
        let component = VirtualComponent::trigger_boolean(BooleanId::new(200), "timer-armed-boolean");
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "boolean",
                "id": 200,
                "config": {
                    "name": "timer-armed-boolean",
                    "persisted": true,
                    "default_value": false,
                    "meta": {"ui": {"view": "label", "titles": ["Disarmed", "Armed"]}}
                }
            })
        );
    }

    #[test]
    fn should_omit_boolean_only_fields_for_button() {
        let component = VirtualComponent::trigger_button(ButtonId::new(200), "arm-timer-button");
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["type"], "button");
        assert!(json["config"].get("persisted").is_none());
        assert!(json["config"]["meta"]["ui"].get("titles").is_none());
    }

    #[test]
    fn should_format_component_key() {
        let component = VirtualComponent::trigger_button(ButtonId::new(201), "b");
        assert_eq!(component.key(), "button:201");
    }

    #[test]
    fn should_map_kind_to_rpc_namespace() {
        assert_eq!(ComponentKind::Button.namespace(), "Button");
        assert_eq!(ComponentKind::Boolean.namespace(), "Boolean");
    }
}
