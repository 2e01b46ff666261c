//! Request and response envelopes.
//!
//! A request body is the method's payload encoded as a JSON object. A
//! response body is the success payload's fields with one reserved,
//! optional `error` string alongside them:
//!
//! ```text
//! {"tacoConsumptionStatus": "Sammy Sosa has consumed 2 tacos"}
//! {"error": "Name is required"}
//! ```
//!
//! A non-empty `error` always wins; the payload fields are then ignored.

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rpc::error::{DispatchError, RpcError, TransportError};

/// Success response: payload fields plus an optional `error`.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope<T> {
    #[serde(flatten)]
    pub payload: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(payload: T) -> Self {
        Self { payload, error: None }
    }
}

/// Failure response carrying only the `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Shape every response body is parsed into before the payload is typed.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Encode a request payload as compact JSON.
pub fn encode_request<T: Serialize + ?Sized>(method: &str, payload: &T) -> Result<Vec<u8>, RpcError> {
    serde_json::to_vec(payload).map_err(|source| RpcError::Serialize {
        method: method.to_string(),
        source,
    })
}

/// Decode a request body into the method's request type.
pub fn decode_request<T: DeserializeOwned>(body: &[u8]) -> Result<T, DispatchError> {
    serde_json::from_slice(body).map_err(DispatchError::Decode)
}

/// Decode a response body into the method's response type.
///
/// A body that is not an envelope is reported as a transport error when the
/// status is a failure (servers are not required to send envelopes on those
/// paths) and as a decode error otherwise.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, RpcError> {
    let raw: RawEnvelope = match serde_json::from_slice(body) {
        Ok(raw) => raw,
        Err(source) => return Err(undecodable(status, body, source)),
    };

    if let Some(error) = raw.error.filter(|e| !e.is_empty()) {
        return Err(RpcError::Remote(error));
    }

    T::deserialize(Value::Object(raw.fields)).map_err(|source| undecodable(status, body, source))
}

fn undecodable(status: StatusCode, body: &[u8], source: serde_json::Error) -> RpcError {
    let body = String::from_utf8_lossy(body).into_owned();
    if status.is_success() {
        RpcError::Decode { body, source }
    } else {
        TransportError::Status {
            status: status.as_u16(),
            body,
        }
        .into()
    }
}
