//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use armplug_domain::error::ArmPlugError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`ArmPlugError`] to an HTTP response.
///
/// Bad input is the caller's fault (400); anything the device refused or
/// failed to answer is reported as a bad gateway (502).
pub struct ApiError(ArmPlugError);

impl From<ArmPlugError> for ApiError {
    fn from(err: ArmPlugError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ArmPlugError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            err => {
                match err.rpc() {
                    Some(rpc) => tracing::error!(
                        error = %err,
                        method = rpc.method(),
                        code = ?rpc.code(),
                        "device call failed"
                    ),
                    None => tracing::error!(error = %err, "device call failed"),
                }
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
