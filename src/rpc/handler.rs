//! Server-side call handling.
//!
//! # Responsibilities
//! - Decode the request envelope into the method's request type
//! - Invoke the bound business method with the call's [`Context`]
//! - Encode the success payload or an in-band error envelope
//! - gzip the response when the caller accepts it
//!
//! # Design Decisions
//! - Malformed requests never reach business logic (400 + error envelope)
//! - Business failures are HTTP 200 with `{"error": "..."}`
//! - Handlers hold no state across calls

use std::fmt::Display;
use std::future::Future;

use axum::body::Body;
use axum::http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::rpc::compress;
use crate::rpc::context::Context;
use crate::rpc::dispatch::RpcRequest;
use crate::rpc::envelope::{decode_request, ErrorEnvelope, ResponseEnvelope};
use crate::rpc::error::DispatchError;
use crate::rpc::CONTENT_TYPE_JSON_UTF8;

/// Sent in place of a business error whose message is empty, since an empty
/// `error` reads as success on the client.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Run one call: decode, invoke `method`, encode.
pub async fn handle<Req, Resp, E, F, Fut>(ctx: Context, request: RpcRequest, method: F) -> Response
where
    Req: DeserializeOwned,
    Resp: Serialize,
    E: Display,
    F: FnOnce(Context, Req) -> Fut,
    Fut: Future<Output = Result<Resp, E>>,
{
    let gzip = compress::accepts_gzip(&request.headers);

    let payload: Req = match decode_request(&request.body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!(method = %request.method, error = %e, "Rejecting undecodable request");
            return error_response(e.status(), &e.to_string(), gzip);
        }
    };

    match method(ctx, payload).await {
        Ok(resp) => encode(StatusCode::OK, &ResponseEnvelope::success(resp), gzip),
        Err(e) => {
            let mut message = e.to_string();
            if message.is_empty() {
                message = UNKNOWN_ERROR.to_string();
            }
            tracing::debug!(method = %request.method, error = %message, "Business method failed");
            error_response(StatusCode::OK, &message, gzip)
        }
    }
}

/// Write `value` as the response body with the given status.
pub fn encode<T: Serialize>(status: StatusCode, value: &T, gzip: bool) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => write_body(status, body, gzip),
        Err(e) => {
            let e = DispatchError::Encode(e);
            tracing::error!(error = %e, "Failed to encode response");
            error_response(e.status(), &e.to_string(), gzip)
        }
    }
}

/// Error envelope `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: &str, gzip: bool) -> Response {
    match serde_json::to_vec(&ErrorEnvelope::new(message)) {
        Ok(body) => write_body(status, body, gzip),
        Err(_) => status.into_response(),
    }
}

fn write_body(status: StatusCode, body: Vec<u8>, gzip: bool) -> Response {
    let mut builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON_UTF8));

    let body = if gzip {
        match compress::gzip(&body) {
            Ok(packed) => {
                builder = builder.header(CONTENT_ENCODING, HeaderValue::from_static(compress::GZIP));
                packed
            }
            Err(e) => {
                tracing::warn!(error = %e, "gzip failed, sending identity body");
                body
            }
        }
    } else {
        body
    };

    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
