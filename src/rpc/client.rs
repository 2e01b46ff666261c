//! Client-side transport.
//!
//! # Responsibilities
//! - Map `Service.Method` onto `POST <remote_host>Service.Method`
//! - Advertise gzip and inflate responses that declare it
//! - Honour the caller's [`Context`] before and during the exchange
//! - Surface in-band errors as [`RpcError::Remote`]
//!
//! # Design Decisions
//! - One `reqwest::Client` (and its connection pool) per [`Client`]
//! - Cloning is cheap; no per-call mutable state
//! - Debug output goes through an injected sink, no-op by default

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::observability::metrics;
use crate::rpc::compress;
use crate::rpc::context::Context;
use crate::rpc::dispatch::MethodId;
use crate::rpc::envelope::{decode_response, encode_request};
use crate::rpc::error::{RpcError, TransportError};
use crate::rpc::CONTENT_TYPE_JSON;

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Receives human-readable trace lines for each call.
pub type DebugSink = Arc<dyn Fn(&str) + Send + Sync>;

/// RPC client bound to one remote base address.
#[derive(Clone)]
pub struct Client {
    remote_host: String,
    http: reqwest::Client,
    debug: DebugSink,
}

impl Client {
    /// Client with the default timeout.
    pub fn new(remote_host: impl Into<String>) -> Result<Self, RpcError> {
        Self::with_timeout(remote_host, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(remote_host: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;
        Ok(Self::from_parts(remote_host, http))
    }

    /// Build from config. `remote_host` is the already-resolved base address.
    pub fn from_config(remote_host: impl Into<String>, config: &ClientConfig) -> Result<Self, RpcError> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(TransportError::from)?;
        Ok(Self::from_parts(remote_host, http))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_parts(remote_host: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            remote_host: remote_host.into(),
            http,
            debug: Arc::new(|_: &str| {}),
        }
    }

    /// Install a debug sink.
    pub fn with_debug<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.debug = Arc::new(sink);
        self
    }

    pub fn remote_host(&self) -> &str {
        &self.remote_host
    }

    /// Call `service.method` with `request`.
    pub async fn call<Req, Resp>(
        &self,
        ctx: &Context,
        service: &str,
        method: &str,
        request: &Req,
    ) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let id = MethodId::new(service, method)?;
        let start = Instant::now();
        let result = self.exchange(ctx, &id, request).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_client_call(&id.to_string(), outcome, start);
        match &result {
            Ok(_) => tracing::debug!(method = %id, elapsed = ?start.elapsed(), "RPC call succeeded"),
            Err(e) => tracing::debug!(method = %id, error = %e, kind = outcome, "RPC call failed"),
        }
        result
    }

    async fn exchange<Req, Resp>(&self, ctx: &Context, id: &MethodId, request: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        if let Some(reason) = ctx.err() {
            return Err(TransportError::from(reason).into());
        }

        let name = id.to_string();
        let body = encode_request(&name, request)?;
        let url = format!("{}{}", self.remote_host, name);
        (self.debug)(&format!("POST {url}"));
        (self.debug)(&format!(">> {}", String::from_utf8_lossy(&body)));

        let send = async {
            let resp = self
                .http
                .post(&url)
                .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
                .header(ACCEPT_ENCODING, compress::GZIP)
                .body(body)
                .send()
                .await?;
            let status = resp.status();
            let gzip = compress::is_gzip_encoded(resp.headers());
            let bytes = resp.bytes().await?;
            Ok::<_, reqwest::Error>((status, gzip, bytes))
        };

        let (status, gzip, raw) = tokio::select! {
            reason = ctx.done() => return Err(TransportError::from(reason).into()),
            result = send => result.map_err(TransportError::from)?,
        };

        let body = if gzip {
            compress::gunzip(&raw).map_err(RpcError::Decompress)?
        } else {
            raw.to_vec()
        };

        decode_response(status, &body)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("remote_host", &self.remote_host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_empty_identifier_rejected() {
        let client = Client::new("http://127.0.0.1:9/oto/").unwrap();
        let err = client
            .call::<_, serde_json::Value>(&Context::background(), "", "EatTaco", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::InvalidMethod(_)));
    }

    #[tokio::test]
    async fn test_cancelled_context_skips_network() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = lines.clone();
        let client = Client::new("http://127.0.0.1:9/oto/")
            .unwrap()
            .with_debug(move |s| sink.lock().unwrap().push(s.to_string()));

        let ctx = Context::background();
        ctx.cancel();
        let err = client
            .call::<_, serde_json::Value>(&ctx, "TacoService", "EatTaco", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Transport(TransportError::Cancelled)));
        assert!(lines.lock().unwrap().is_empty(), "nothing should be sent");
    }

    #[test]
    fn test_debug_hides_transport() {
        let client = Client::new("http://localhost:8080/oto/").unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("localhost:8080"));
    }
}
