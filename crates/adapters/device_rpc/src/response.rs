//! Helpers to pull typed fields out of RPC responses.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use armplug_domain::error::RpcFailure;

/// Take field `name` out of `response`, failing if it is absent.
pub(crate) fn field(method: &str, response: &mut Value, name: &str) -> Result<Value, RpcFailure> {
    response
        .get_mut(name)
        .map(Value::take)
        .ok_or_else(|| RpcFailure::malformed(method, format!("missing `{name}` field")))
}

/// Take field `name` and deserialize it as `T`.
pub(crate) fn typed_field<T: DeserializeOwned>(
    method: &str,
    response: &mut Value,
    name: &str,
) -> Result<T, RpcFailure> {
    let value = field(method, response, name)?;
    serde_json::from_value(value)
        .map_err(|err| RpcFailure::malformed(method, format!("invalid `{name}` field: {err}")))
}

/// Serialize request parameters.
pub(crate) fn params<T: Serialize>(method: &str, value: &T) -> Result<Value, RpcFailure> {
    serde_json::to_value(value)
        .map_err(|err| RpcFailure::malformed(method, format!("unserializable params: {err}")))
}
