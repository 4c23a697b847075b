//! Error taxonomy for the two remote operations.

use std::fmt;

use thiserror::Error;

/// Which remote operation failed. Used as the error message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListOpportunities,
    TriggerRecompute,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::ListOpportunities => write!(f, "Failed to fetch opportunities"),
            Endpoint::TriggerRecompute => write!(f, "Failed to refresh arbitrage data"),
        }
    }
}

/// Network unreachable or non-2xx status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {reason}")]
    Network { reason: String },
}

/// Failure of a remote operation, tagged with the operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{endpoint}: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: TransportError,
    },

    #[error("{endpoint}: malformed response ({reason})")]
    MalformedResponse { endpoint: Endpoint, reason: String },
}

impl ApiError {
    pub fn status(endpoint: Endpoint, status: u16, body: impl Into<String>) -> Self {
        ApiError::Transport {
            endpoint,
            source: TransportError::Status {
                status,
                body: body.into(),
            },
        }
    }

    pub fn network(endpoint: Endpoint, reason: impl fmt::Display) -> Self {
        ApiError::Transport {
            endpoint,
            source: TransportError::Network {
                reason: reason.to_string(),
            },
        }
    }

    pub fn malformed(endpoint: Endpoint, reason: impl fmt::Display) -> Self {
        ApiError::MalformedResponse {
            endpoint,
            reason: reason.to_string(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            ApiError::Transport { endpoint, .. } | ApiError::MalformedResponse { endpoint, .. } => {
                *endpoint
            }
        }
    }

    /// HTTP status when the server answered with a non-2xx code.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Transport {
                source: TransportError::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}
