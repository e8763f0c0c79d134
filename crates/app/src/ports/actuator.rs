//! Power actuator port: the switched output.

use std::future::Future;

use armplug_domain::error::ArmPlugError;

/// Drives the switched output.
pub trait PowerActuator {
    /// Turn the output on or off.
    ///
    /// Fails with [`ArmPlugError::Actuator`].
    fn set_output(&self, on: bool) -> impl Future<Output = Result<(), ArmPlugError>> + Send;

    /// Turn the output on.
    fn power_on(&self) -> impl Future<Output = Result<(), ArmPlugError>> + Send {
        self.set_output(true)
    }
}

impl<T: PowerActuator + Send + Sync> PowerActuator for std::sync::Arc<T> {
    fn set_output(&self, on: bool) -> impl Future<Output = Result<(), ArmPlugError>> + Send {
        (**self).set_output(on)
    }
}
