//! Trigger state backed by a persisted virtual boolean.

use serde_json::json;

use armplug_app::ports::{RpcGateway, TriggerStateStore};
use armplug_domain::error::ArmPlugError;
use armplug_domain::id::BooleanId;
use armplug_domain::trigger::TriggerState;

use crate::methods::{BOOLEAN_GET_STATUS, BOOLEAN_SET};
use crate::response::typed_field;

/// [`TriggerStateStore`] reading and writing `boolean:<id>`.
///
/// `true` on the device means armed.
pub struct RpcTriggerStore<G> {
    gateway: G,
    id: BooleanId,
}

impl<G> RpcTriggerStore<G> {
    pub fn new(gateway: G, id: BooleanId) -> Self {
        Self { gateway, id }
    }
}

impl<G: RpcGateway + Send + Sync> TriggerStateStore for RpcTriggerStore<G> {
    async fn get_state(&self) -> Result<TriggerState, ArmPlugError> {
        let mut status = self
            .gateway
            .call(BOOLEAN_GET_STATUS, json!({ "id": self.id }))
            .await
            .map_err(ArmPlugError::Read)?;
        let armed: bool =
            typed_field(BOOLEAN_GET_STATUS, &mut status, "value").map_err(ArmPlugError::Read)?;
        Ok(TriggerState::from_armed(armed))
    }

    async fn set_state(&self, state: TriggerState) -> Result<(), ArmPlugError> {
        self.gateway
            .call(
                BOOLEAN_SET,
                json!({ "id": self.id, "value": state.is_armed() }),
            )
            .await
            .map_err(ArmPlugError::Write)?;
        tracing::debug!(boolean = %self.id, %state, "trigger state written");
        Ok(())
    }
}
