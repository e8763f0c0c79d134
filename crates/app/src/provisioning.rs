//! Trigger entity provisioning: make sure the virtual button and boolean exist.

use tracing::{info, warn};

use armplug_domain::component::VirtualComponent;
use armplug_domain::error::ArmPlugError;

use crate::ports::ComponentRegistry;

/// What provisioning did for a single component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The component was missing and has been added.
    Created,
    /// The component existed under the expected name; its config was refreshed.
    Updated,
    /// The slot is taken by a component with another name; left untouched.
    NameConflict { existing: String },
}

/// Application service provisioning virtual components.
pub struct Provisioner<R> {
    registry: R,
}

impl<R: ComponentRegistry> Provisioner<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Ensure `component` exists with the expected name and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArmPlugError::Provisioning`] when the device rejects the
    /// lookup, the add or the config update.
    #[tracing::instrument(skip(self, component), fields(component = %component.key()))]
    pub async fn ensure(
        &self,
        component: &VirtualComponent,
    ) -> Result<ProvisionOutcome, ArmPlugError> {
        match self.registry.find(component.kind, component.id).await? {
            None => {
                self.registry.add(component).await?;
                info!(name = %component.config.name, "virtual component created");
                Ok(ProvisionOutcome::Created)
            }
            Some(existing) if existing.name == component.config.name => {
                self.registry.set_config(component).await?;
                info!(name = %component.config.name, "virtual component config refreshed");
                Ok(ProvisionOutcome::Updated)
            }
            Some(existing) => {
                warn!(
                    expected = %component.config.name,
                    existing = %existing.name,
                    "slot already used by another component, leaving it alone"
                );
                Ok(ProvisionOutcome::NameConflict {
                    existing: existing.name,
                })
            }
        }
    }

    /// Ensure every component in order, one result per component.
    ///
    /// A failure is logged with the failing method and code, then the next
    /// component is tried. Startup carries on either way.
    pub async fn ensure_all(
        &self,
        components: &[VirtualComponent],
    ) -> Vec<Result<ProvisionOutcome, ArmPlugError>> {
        let mut outcomes = Vec::with_capacity(components.len());
        for component in components {
            let outcome = self.ensure(component).await;
            if let Err(err) = &outcome {
                let rpc = err.rpc();
                warn!(
                    component = %component.key(),
                    method = rpc.map(|rpc| rpc.method()),
                    code = ?rpc.and_then(|rpc| rpc.code()),
                    error = %err,
                    "unable to provision virtual component"
                );
            }
            outcomes.push(outcome);
        }
        outcomes
    }
}
