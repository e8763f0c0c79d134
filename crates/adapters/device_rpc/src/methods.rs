//! RPC method names understood by the device.

use armplug_domain::component::ComponentKind;

pub const BOOLEAN_GET_STATUS: &str = "Boolean.GetStatus";
pub const BOOLEAN_SET: &str = "Boolean.Set";
pub const SCHEDULE_LIST: &str = "Schedule.List";
pub const SCHEDULE_CREATE: &str = "Schedule.Create";
pub const SCHEDULE_UPDATE: &str = "Schedule.Update";
pub const SWITCH_SET: &str = "Switch.Set";
pub const VIRTUAL_ADD: &str = "Virtual.Add";

/// `Button.GetConfig` or `Boolean.GetConfig`.
#[must_use]
pub fn get_config(kind: ComponentKind) -> String {
    format!("{}.GetConfig", kind.namespace())
}

/// `Button.SetConfig` or `Boolean.SetConfig`.
#[must_use]
pub fn set_config(kind: ComponentKind) -> String {
    format!("{}.SetConfig", kind.namespace())
}
