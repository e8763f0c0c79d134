//! Trigger state port: the persisted arm state.

use std::future::Future;

use armplug_domain::error::ArmPlugError;
use armplug_domain::trigger::TriggerState;

/// Reads and writes the single persisted [`TriggerState`].
///
/// A successful [`set_state`](Self::set_state) is visible to every
/// subsequent [`get_state`](Self::get_state).
pub trait TriggerStateStore {
    /// Read the current state.
    ///
    /// Fails with [`ArmPlugError::Read`] when the store is unreachable or
    /// returns malformed data.
    fn get_state(&self) -> impl Future<Output = Result<TriggerState, ArmPlugError>> + Send;

    /// Persist a new state.
    ///
    /// Fails with [`ArmPlugError::Write`] on the same conditions.
    fn set_state(
        &self,
        state: TriggerState,
    ) -> impl Future<Output = Result<(), ArmPlugError>> + Send;
}

impl<T: TriggerStateStore + Send + Sync> TriggerStateStore for std::sync::Arc<T> {
    fn get_state(&self) -> impl Future<Output = Result<TriggerState, ArmPlugError>> + Send {
        (**self).get_state()
    }

    fn set_state(
        &self,
        state: TriggerState,
    ) -> impl Future<Output = Result<(), ArmPlugError>> + Send {
        (**self).set_state(state)
    }
}
