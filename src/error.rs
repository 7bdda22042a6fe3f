use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Normalized shape of a failure reported by the service or the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    pub message: String,
    pub name: String,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} ({}): {}", self.name, code, self.message),
            None => write!(f, "{}: {}", self.name, self.message),
        }
    }
}

/// Errors returned by [`crate::MyAdminApiClient`].
///
/// The first three variants are local precondition failures raised before
/// any request is sent. `Remote` and `Transport` both carry an
/// [`ErrorRecord`], see [`ClientError::record`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required construction field was missing.
    #[error("{0}")]
    Validation(String),

    /// A call argument was missing or malformed.
    #[error("{0}")]
    InvalidArgument(String),

    /// `call` was used before `authenticate` succeeded.
    #[error("Must authenticate() before using call()")]
    AuthenticationRequired,

    /// The service answered with an application-level error.
    #[error("remote error: {0}")]
    Remote(ErrorRecord),

    /// The HTTP round-trip failed or returned a non-2xx status.
    #[error("transport error: {0}")]
    Transport(ErrorRecord),

    /// The service answered with something that is not the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The error record for remote and transport failures.
    pub fn record(&self) -> Option<&ErrorRecord> {
        match self {
            ClientError::Remote(record) | ClientError::Transport(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ClientError::Remote(_))
    }
}
