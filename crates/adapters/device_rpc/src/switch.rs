//! Switched output.

use serde_json::json;

use armplug_app::ports::{PowerActuator, RpcGateway};
use armplug_domain::error::ArmPlugError;
use armplug_domain::id::SwitchId;

use crate::methods::SWITCH_SET;

/// [`PowerActuator`] driving `switch:<id>`.
pub struct RpcSwitch<G> {
    gateway: G,
    id: SwitchId,
}

impl<G> RpcSwitch<G> {
    pub fn new(gateway: G, id: SwitchId) -> Self {
        Self { gateway, id }
    }
}

impl<G: RpcGateway + Send + Sync> PowerActuator for RpcSwitch<G> {
    async fn set_output(&self, on: bool) -> Result<(), ArmPlugError> {
        self.gateway
            .call(SWITCH_SET, json!({ "id": self.id, "on": on }))
            .await
            .map_err(ArmPlugError::Actuator)?;
        tracing::info!(switch = %self.id, on, "output switched");
        Ok(())
    }
}
