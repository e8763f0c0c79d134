//! Common error types used across the workspace.
//!
//! Every failure the controller can observe originates from a device RPC
//! call, so the core taxonomy ([`ArmPlugError`]) wraps a typed
//! [`RpcFailure`] describing which method failed and how. Each layer
//! converts into it via `From`; there are no `String`-only variants.

/// A failed device RPC call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcFailure {
    /// The device answered with a non-zero error code.
    #[error("`{method}` failed with code {code}: {message}")]
    Remote {
        method: String,
        code: i64,
        message: String,
    },

    /// The device answered, but the payload lacks the expected fields.
    #[error("`{method}` returned a malformed response: {reason}")]
    Malformed { method: String, reason: String },

    /// The completion was dropped before a response was observed.
    #[error("`{method}` completed without a response")]
    Dropped { method: String },
}

impl RpcFailure {
    /// Build a [`RpcFailure::Remote`].
    #[must_use]
    pub fn remote(method: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        Self::Remote {
            method: method.into(),
            code,
            message: message.into(),
        }
    }

    /// Build a [`RpcFailure::Malformed`].
    #[must_use]
    pub fn malformed(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Name of the RPC method that failed.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            Self::Remote { method, .. }
            | Self::Malformed { method, .. }
            | Self::Dropped { method } => method,
        }
    }

    /// Device error code, when the device reported one.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Remote { code, .. } => Some(*code),
            Self::Malformed { .. } | Self::Dropped { .. } => None,
        }
    }
}

/// Domain invariant violations, raised when building configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("component name must not be empty")]
    EmptyName,

    #[error("provenance tag must not be empty")]
    EmptyOrigin,

    #[error("event kind must not be empty")]
    EmptyEventKind,

    #[error("toggle and fire events must differ, both are `{0}`")]
    AmbiguousEvents(String),

    #[error("hour {0} is out of range (0..=23)")]
    HourOutOfRange(u32),

    #[error("invalid timespec `{spec}`: {reason}")]
    InvalidTimespec { spec: String, reason: String },
}

/// Top-level error for the controller core.
///
/// Variants follow the failing operation, not the failing transport, so a
/// caller can tell a failed read apart from a failed write of the same
/// virtual boolean.
#[derive(Debug, thiserror::Error)]
pub enum ArmPlugError {
    #[error("failed to read trigger state")]
    Read(#[source] RpcFailure),

    #[error("failed to write trigger state")]
    Write(#[source] RpcFailure),

    #[error("failed to list scheduled jobs")]
    List(#[source] RpcFailure),

    #[error("failed to create or update the scheduled job")]
    CreateOrUpdate(#[source] RpcFailure),

    #[error("failed to switch the output")]
    Actuator(#[source] RpcFailure),

    #[error("failed to provision virtual component")]
    Provisioning(#[source] RpcFailure),

    #[error("validation error")]
    Validation(#[from] ValidationError),
}

impl ArmPlugError {
    /// The underlying RPC failure, if this error came from the device.
    #[must_use]
    pub fn rpc(&self) -> Option<&RpcFailure> {
        match self {
            Self::Read(err)
            | Self::Write(err)
            | Self::List(err)
            | Self::CreateOrUpdate(err)
            | Self::Actuator(err)
            | Self::Provisioning(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}
