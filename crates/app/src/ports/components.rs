//! Component registry port: virtual components on the device.

use std::future::Future;

use armplug_domain::component::{ComponentKind, VirtualComponent};
use armplug_domain::error::ArmPlugError;

/// What the device reports about an existing component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingComponent {
    pub name: String,
}

/// Looks up, adds and reconfigures virtual components.
pub trait ComponentRegistry {
    /// Look up a component by kind and id; `None` when the device has none.
    fn find(
        &self,
        kind: ComponentKind,
        id: u32,
    ) -> impl Future<Output = Result<Option<ExistingComponent>, ArmPlugError>> + Send;

    /// Add a new virtual component.
    fn add(
        &self,
        component: &VirtualComponent,
    ) -> impl Future<Output = Result<(), ArmPlugError>> + Send;

    /// Overwrite the configuration of an existing component.
    fn set_config(
        &self,
        component: &VirtualComponent,
    ) -> impl Future<Output = Result<(), ArmPlugError>> + Send;
}
