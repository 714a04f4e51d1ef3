//! Error types for the association reconciliation protocol.
//!
//! Two layers are kept apart: [`TransportError`] describes a failed remote
//! call, while [`AssociationError`] is what the codec and reconciler return to
//! callers and always carries the composite ID or its components.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by a transport while talking to the remote control plane.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Credentials were rejected (401/403).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The remote reported the addressed resource as missing (404).
    #[error("Remote resource not found: {message}")]
    ResourceNotFound { message: String },

    /// The remote throttled the request (429).
    #[error("Throttled: {message}")]
    Throttled { message: String },

    /// The request was rejected as invalid (other 4xx).
    #[error("Invalid request (HTTP {status}): {message}")]
    InvalidRequest { status: u16, message: String },

    /// The remote failed to serve the request (5xx).
    #[error("Service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    /// Connection-level failure before a response was received.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The operation deadline expired.
    #[error("Timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },

    /// The response body could not be decoded.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// The remote returned a page token that was already visited.
    #[error("Pagination loop detected at token {token}")]
    Pagination { token: String },
}

impl TransportError {
    /// Classify an HTTP error status into a transport error.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized { message },
            404 => Self::ResourceNotFound { message },
            429 => Self::Throttled { message },
            s if s >= 500 => Self::Service { status: s, message },
            s => Self::InvalidRequest { status: s, message },
        }
    }

    /// Create a new `Network` error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new `Decode` error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether the host may reasonably retry the failed call.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Throttled { .. }
            | Self::Network { .. }
            | Self::Timeout { .. }
            | Self::Service { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the remote reported the addressed resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized { .. } => ErrorCategory::Auth,
            Self::ResourceNotFound { .. } => ErrorCategory::NotFound,
            Self::Throttled { .. } => ErrorCategory::Throttling,
            Self::InvalidRequest { .. } => ErrorCategory::Validation,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::Service { .. } | Self::Network { .. } => ErrorCategory::Infrastructure,
            Self::Decode { .. } | Self::Pagination { .. } => ErrorCategory::Protocol,
        }
    }
}

/// Errors returned by the codec and the reconciler.
#[derive(Debug, Error)]
pub enum AssociationError {
    /// A component cannot be encoded without ambiguity.
    #[error("Cannot encode association ID from ({instance_id}, {function_arn}): {reason}")]
    Encoding {
        instance_id: String,
        function_arn: String,
        reason: String,
    },

    /// A composite ID did not decode into two non-empty components.
    #[error("Malformed association ID {id:?}: expected INSTANCE_ID{separator}FUNCTION_ARN")]
    MalformedIdentifier { id: String, separator: char },

    /// The function ARN does not look like an ARN.
    #[error("{arn:?} is not a valid ARN")]
    InvalidArn { arn: String },

    /// The association is absent on the remote; the host should drop it.
    #[error("Association not found: {id}")]
    NotFound { id: String },

    /// A remote call failed outside of create/delete.
    #[error("Error finding association {id}: {source}")]
    Transport {
        id: String,
        #[source]
        source: TransportError,
    },

    /// The remote associate call failed.
    #[error("Error creating association {id}: {source}")]
    Create {
        id: String,
        #[source]
        source: TransportError,
    },

    /// The remote disassociate call failed.
    #[error("Error deleting association {id}: {source}")]
    Delete {
        id: String,
        #[source]
        source: TransportError,
    },
}

impl AssociationError {
    /// Create a new `NotFound` error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a new `InvalidArn` error
    pub fn invalid_arn(arn: impl Into<String>) -> Self {
        Self::InvalidArn { arn: arn.into() }
    }

    /// Returns `true` if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the underlying transport error, if any.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Transport { source, .. }
            | Self::Create { source, .. }
            | Self::Delete { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Encoding { .. } | Self::MalformedIdentifier { .. } | Self::InvalidArn { .. } => {
                ErrorCategory::Validation
            }
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Transport { source, .. }
            | Self::Create { source, .. }
            | Self::Delete { source, .. } => source.category(),
        }
    }
}

/// Error categories for logging and monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Auth,
    Throttling,
    Timeout,
    Infrastructure,
    Protocol,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Auth => write!(f, "auth"),
            Self::Throttling => write!(f, "throttling"),
            Self::Timeout => write!(f, "timeout"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Protocol => write!(f, "protocol"),
        }
    }
}

/// Result type alias for association operations
pub type Result<T> = std::result::Result<T, AssociationError>;
