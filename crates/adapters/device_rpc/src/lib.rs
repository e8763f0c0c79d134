//! # armplug-adapter-device-rpc
//!
//! Typed ports on top of the raw device RPC channel.
//!
//! ## Responsibilities
//! - `RpcTriggerStore`: `Boolean.GetStatus` / `Boolean.Set` on the trigger boolean
//! - `RpcScheduleRepository`: `Schedule.List` / `Schedule.Create` / `Schedule.Update`
//! - `RpcSwitch`: `Switch.Set` on the switched output
//! - `RpcComponentRegistry`: `*.GetConfig`, `*.SetConfig` and `Virtual.Add`
//!
//! Each adapter maps a failed call onto the [`ArmPlugError`] variant of the
//! operation that issued it, and rejects responses missing the expected
//! fields as [`RpcFailure::Malformed`].
//!
//! ## Dependency rule
//! Depends on `armplug-app` (for port traits) and `armplug-domain`. Works
//! with any [`RpcGateway`](armplug_app::ports::RpcGateway) implementation.
//!
//! [`ArmPlugError`]: armplug_domain::error::ArmPlugError
//! [`RpcFailure::Malformed`]: armplug_domain::error::RpcFailure::Malformed

pub mod components;
pub mod methods;
mod response;
pub mod schedule;
pub mod switch;
pub mod trigger_store;

pub use components::RpcComponentRegistry;
pub use schedule::RpcScheduleRepository;
pub use switch::RpcSwitch;
pub use trigger_store::RpcTriggerStore;

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;

    use armplug_app::ports::RpcGateway;
    use armplug_domain::error::RpcFailure;
    use serde_json::Value;

    /// Gateway answering from a queue of canned responses.
    #[derive(Default)]
    pub struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<Value, RpcFailure>>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedGateway {
        pub fn replying(responses: impl IntoIterator<Item = Result<Value, RpcFailure>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: Mutex::default(),
            }
        }

        pub fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RpcGateway for ScriptedGateway {
        fn call(
            &self,
            method: &str,
            params: Value,
        ) -> impl Future<Output = Result<Value, RpcFailure>> + Send {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), params));
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(RpcFailure::Dropped {
                        method: method.to_string(),
                    })
                });
            async move { response }
        }
    }
}
