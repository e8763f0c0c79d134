//! Error codes and request decoding for the simulated device.

use serde::de::DeserializeOwned;
use serde_json::Value;

use armplug_domain::error::RpcFailure;

pub const INVALID_ARGUMENT: i64 = -103;
pub const NOT_FOUND: i64 = -105;
pub const ALREADY_EXISTS: i64 = -106;
pub const UNAVAILABLE: i64 = -114;
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Decode request parameters, answering bad input with [`INVALID_ARGUMENT`].
pub(crate) fn decode<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, RpcFailure> {
    serde_json::from_value(params)
        .map_err(|err| RpcFailure::remote(method, INVALID_ARGUMENT, err.to_string()))
}

pub(crate) fn not_found(method: &str, key: &str) -> RpcFailure {
    RpcFailure::remote(method, NOT_FOUND, format!("Component {key} not found!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct IdParams {
        id: u32,
    }

    #[test]
    fn should_decode_valid_params() {
        let params: IdParams = decode("Switch.Set", json!({"id": 3})).unwrap();
        assert_eq!(params.id, 3);
    }

    #[test]
    fn should_reject_missing_id_as_invalid_argument() {
        let err = decode::<IdParams>("Switch.Set", json!({})).unwrap_err();
        assert_eq!(err.code(), Some(INVALID_ARGUMENT));
        assert_eq!(err.method(), "Switch.Set");
    }
}
