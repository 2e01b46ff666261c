//! Error taxonomy for RPC calls.
//!
//! Client calls fail with [`RpcError`]; every variant is distinguishable so
//! callers can tell a transport problem from an in-band business failure.
//! Server-side routing and decoding failures are [`DispatchError`]s, which
//! render themselves as error envelopes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::rpc::context::ContextError;
use crate::rpc::handler::error_response;

/// Errors returned by [`crate::rpc::Client::call`].
#[derive(Debug, Error)]
pub enum RpcError {
    /// Service or method name was empty.
    #[error("invalid method identifier: {0:?}")]
    InvalidMethod(String),

    /// Request payload could not be encoded.
    #[error("{method}: serialize request: {source}")]
    Serialize {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// Connection, timeout, cancellation or a non-decodable error status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response declared gzip but the stream was invalid.
    #[error("decompress response: {0}")]
    Decompress(#[source] std::io::Error),

    /// Response body was not a valid envelope on a success status.
    #[error("decode response: {source}: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope carried a non-empty `error` string.
    #[error("{0}")]
    Remote(String),
}

impl RpcError {
    /// True when the server reported an in-band business failure.
    pub fn is_remote(&self) -> bool {
        matches!(self, RpcError::Remote(_))
    }

    /// True for connection, timeout, cancellation and status failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport(_))
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RpcError::InvalidMethod(_) => "invalid_method",
            RpcError::Serialize { .. } => "serialize",
            RpcError::Transport(_) => "transport",
            RpcError::Decompress(_) => "decompress",
            RpcError::Decode { .. } => "decode",
            RpcError::Remote(_) => "remote",
        }
    }
}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client failed to build, connect, send or read.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The client's transport timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// The call context was cancelled.
    #[error("call cancelled")]
    Cancelled,

    /// The call context's deadline passed.
    #[error("call deadline exceeded")]
    DeadlineExceeded,

    /// Non-success status whose body was not a decodable envelope.
    #[error("({status}) {body}")]
    Status { status: u16, body: String },
}

impl TransportError {
    /// True when the failure came from the caller's context.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, TransportError::Cancelled | TransportError::DeadlineExceeded)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(err)
        }
    }
}

impl From<ContextError> for TransportError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => TransportError::Cancelled,
            ContextError::DeadlineExceeded => TransportError::DeadlineExceeded,
        }
    }
}

/// Server-side failures that never reach business logic.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler is registered for the path's `Service.Method`.
    #[error("not found: {0}")]
    RouteNotFound(String),

    /// Request body could not be read (too large or broken stream).
    #[error("read request body: {0}")]
    Body(String),

    /// Request body was not a valid envelope for the method.
    #[error("decode request: {0}")]
    Decode(#[source] serde_json::Error),

    /// Response payload could not be encoded.
    #[error("encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DispatchError {
    /// HTTP status used when this error is written to the wire.
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            DispatchError::Body(_) | DispatchError::Decode(_) => StatusCode::BAD_REQUEST,
            DispatchError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        error_response(self.status(), &self.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RpcError::Remote("Name is required".into());
        assert_eq!(err.to_string(), "Name is required");
        assert!(err.is_remote());
        assert!(!err.is_transport());

        let err = RpcError::from(TransportError::Status {
            status: 502,
            body: "bad gateway".into(),
        });
        assert_eq!(err.to_string(), "(502) bad gateway");
        assert!(err.is_transport());
        assert_eq!(err.kind(), "transport");
    }

    #[test]
    fn test_context_error_conversion() {
        assert!(matches!(
            TransportError::from(ContextError::Cancelled),
            TransportError::Cancelled
        ));
        assert!(TransportError::from(ContextError::DeadlineExceeded).is_cancellation());
        assert!(!TransportError::Timeout.is_cancellation());
    }

    #[test]
    fn test_dispatch_error_status() {
        assert_eq!(
            DispatchError::RouteNotFound("/oto/Unknown.Method".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(DispatchError::Body("too large".into()).status(), StatusCode::BAD_REQUEST);
    }
}
