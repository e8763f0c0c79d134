//! Virtual component lookup and provisioning.

use serde_json::json;

use armplug_app::ports::{ComponentRegistry, ExistingComponent, RpcGateway};
use armplug_domain::component::{ComponentKind, VirtualComponent};
use armplug_domain::error::{ArmPlugError, RpcFailure};

use crate::methods::{VIRTUAL_ADD, get_config, set_config};
use crate::response::{params, typed_field};

/// [`ComponentRegistry`] over `*.GetConfig`, `*.SetConfig` and `Virtual.Add`.
pub struct RpcComponentRegistry<G> {
    gateway: G,
}

impl<G> RpcComponentRegistry<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

impl<G: RpcGateway + Send + Sync> ComponentRegistry for RpcComponentRegistry<G> {
    async fn find(
        &self,
        kind: ComponentKind,
        id: u32,
    ) -> Result<Option<ExistingComponent>, ArmPlugError> {
        let method = get_config(kind);
        match self.gateway.call(&method, json!({ "id": id })).await {
            Ok(mut config) => {
                let name: String =
                    typed_field(&method, &mut config, "name").map_err(ArmPlugError::Provisioning)?;
                Ok(Some(ExistingComponent { name }))
            }
            // The device answers an unknown id with an error code.
            Err(RpcFailure::Remote { code, message, .. }) => {
                tracing::debug!(%kind, id, code, %message, "component not found");
                Ok(None)
            }
            Err(err) => Err(ArmPlugError::Provisioning(err)),
        }
    }

    async fn add(&self, component: &VirtualComponent) -> Result<(), ArmPlugError> {
        let request = params(VIRTUAL_ADD, component).map_err(ArmPlugError::Provisioning)?;
        self.gateway
            .call(VIRTUAL_ADD, request)
            .await
            .map_err(ArmPlugError::Provisioning)?;
        Ok(())
    }

    async fn set_config(&self, component: &VirtualComponent) -> Result<(), ArmPlugError> {
        let method = set_config(component.kind);
        let config = params(&method, &component.config).map_err(ArmPlugError::Provisioning)?;
        self.gateway
            .call(&method, json!({ "id": component.id, "config": config }))
            .await
            .map_err(ArmPlugError::Provisioning)?;
        Ok(())
    }
}
