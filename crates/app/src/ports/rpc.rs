//! Device RPC gateway port: the raw request/response channel to the device.
//!
//! Every typed port ([`TriggerStateStore`](super::TriggerStateStore),
//! [`ScheduleRepository`](super::ScheduleRepository), …) is implemented in
//! an adapter on top of this one.

use std::future::Future;

use armplug_domain::error::RpcFailure;

/// Invokes named RPC methods on the device.
///
/// The returned future resolves at most once. Ordering relative to other
/// in-flight calls is unspecified.
pub trait RpcGateway {
    /// Call `method` with `params`, returning the result payload.
    fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, RpcFailure>> + Send;
}

impl<T: RpcGateway + Send + Sync> RpcGateway for std::sync::Arc<T> {
    fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, RpcFailure>> + Send {
        (**self).call(method, params)
    }
}
