//! Method registration and request routing.
//!
//! # Responsibilities
//! - Store one handler per `Service.Method` identifier
//! - Resolve a request path to its handler by the final path segment
//! - Read the request body and build the per-call [`Context`]
//! - Answer unmatched paths with 404 and an error envelope
//!
//! # Design Decisions
//! - Registration happens before serving; re-registering overwrites
//! - Immutable after construction (shared via `Arc`, no locks)
//! - Exact, case-sensitive matching; no prefix or wildcard fallbacks

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use futures_util::future::BoxFuture;

use crate::observability::metrics;
use crate::rpc::context::Context;
use crate::rpc::error::{DispatchError, RpcError};
use crate::rpc::DEFAULT_BASE_PATH;

/// Default cap on request bodies.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// `(service, method)` pair naming one RPC operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId {
    service: String,
    method: String,
}

impl MethodId {
    /// Both parts must be non-empty and free of `.` and `/`.
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Result<Self, RpcError> {
        let service = service.into();
        let method = method.into();
        let valid = |s: &str| !s.is_empty() && !s.contains(['.', '/']);
        if !valid(&service) || !valid(&method) {
            return Err(RpcError::InvalidMethod(format!("{service}.{method}")));
        }
        Ok(Self { service, method })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service, self.method)
    }
}

/// A routed request as seen by a handler.
#[derive(Debug, Clone)]
pub struct RpcRequest {
    /// `Service.Method` this request was routed to.
    pub method: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Type-erased handler stored in the table.
pub type Handler = Arc<dyn Fn(Context, RpcRequest) -> BoxFuture<'static, Response> + Send + Sync>;

/// Routing table from `Service.Method` to handler.
pub struct DispatchTable {
    base_path: String,
    body_limit: usize,
    request_timeout: Option<Duration>,
    routes: HashMap<String, Handler>,
}

impl DispatchTable {
    /// Empty table mounted at `/oto/`.
    pub fn new() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
            request_timeout: None,
            routes: HashMap::new(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Deadline handed to each call's [`Context`].
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Bind `handler` to `service.method`. Last registration wins.
    ///
    /// Names follow the same rules as [`MethodId::new`], so every registered
    /// key is one a client can produce.
    pub fn register<F, Fut>(&mut self, service: &str, method: &str, handler: F) -> Result<(), RpcError>
    where
        F: Fn(Context, RpcRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let key = MethodId::new(service, method)
            .inspect_err(|e| tracing::error!(error = %e, "Rejected RPC registration"))?
            .to_string();
        tracing::debug!(method = %key, "Registering RPC method");
        let boxed: Handler = Arc::new(move |ctx: Context, req: RpcRequest| {
            Box::pin(handler(ctx, req)) as BoxFuture<'static, Response>
        });
        if self.routes.insert(key.clone(), boxed).is_some() {
            tracing::debug!(method = %key, "Replaced existing registration");
        }
        Ok(())
    }

    /// Resolve a request path by its final segment.
    pub fn route(&self, request_path: &str) -> Result<&Handler, DispatchError> {
        let key = request_path.rsplit('/').next().unwrap_or_default();
        self.routes
            .get(key)
            .ok_or_else(|| DispatchError::RouteNotFound(request_path.to_string()))
    }

    /// Registered `Service.Method` keys, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route, read the body, and run the handler.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let path = request.uri().path().to_string();

        let handler = match self.route(&path) {
            Ok(h) => h.clone(),
            Err(e) => {
                tracing::warn!(path = %path, "No RPC method matched");
                metrics::record_server_request("none", e.status().as_u16(), start);
                return e.into_response();
            }
        };
        let method = path.rsplit('/').next().unwrap_or_default().to_string();

        let (parts, body) = request.into_parts();
        let body = match to_bytes(body, self.body_limit).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let e = DispatchError::Body(e.to_string());
                tracing::warn!(method = %method, error = %e, "Failed to read request body");
                metrics::record_server_request(&method, e.status().as_u16(), start);
                return e.into_response();
            }
        };

        let ctx = match self.request_timeout {
            Some(timeout) => Context::with_timeout(timeout),
            None => Context::background(),
        };
        // Dropping the request future (client gone, timeout layer) cancels the call.
        let _guard = ctx.cancellation_token().clone().drop_guard();

        tracing::debug!(method = %method, bytes = body.len(), "Dispatching RPC call");
        let response = handler(
            ctx,
            RpcRequest {
                method: method.clone(),
                headers: parts.headers,
                body,
            },
        )
        .await;

        metrics::record_server_request(&method, response.status().as_u16(), start);
        response
    }

    /// Mount the table at `POST <base_path>{call}`.
    pub fn into_router(self) -> Router {
        let path = format!("{}{{call}}", self.base_path);
        Router::new()
            .route(&path, post(dispatch_handler))
            .with_state(Arc::new(self))
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

async fn dispatch_handler(State(table): State<Arc<DispatchTable>>, request: Request<Body>) -> Response {
    table.dispatch(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::rpc::envelope::ErrorEnvelope;

    fn tagged(tag: &'static str) -> impl Fn(Context, RpcRequest) -> std::future::Ready<Response> + Send + Sync {
        move |_ctx, _req| std::future::ready(tag.into_response())
    }

    async fn text(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn table() -> DispatchTable {
        let mut table = DispatchTable::new();
        table.register("TacoService", "EatTaco", tagged("eat")).unwrap();
        table.register("TacoService", "Count", tagged("count")).unwrap();
        table
    }

    #[test]
    fn test_method_id() {
        let id = MethodId::new("TacoService", "EatTaco").unwrap();
        assert_eq!(id.to_string(), "TacoService.EatTaco");
        assert!(MethodId::new("", "EatTaco").is_err());
        assert!(MethodId::new("TacoService", "").is_err());
        assert!(MethodId::new("Taco.Service", "Eat").is_err());
    }

    #[tokio::test]
    async fn test_route_exact() {
        let table = table();
        let resp = table.route("TacoService.EatTaco").unwrap()(Context::background(), empty()).await;
        assert_eq!(text(resp).await, "eat");

        let resp = table.route("/oto/TacoService.Count").unwrap()(Context::background(), empty()).await;
        assert_eq!(text(resp).await, "count");
    }

    #[test]
    fn test_route_not_found() {
        let table = table();
        for path in [
            "TacoService.Nonexistent",
            "Unknown.Method",
            "tacoservice.eattaco",
            "TacoService.EatTaco/",
            "",
        ] {
            assert!(
                matches!(table.route(path), Err(DispatchError::RouteNotFound(_))),
                "{path} should not route"
            );
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut table = table();
        table.register("TacoService", "EatTaco", tagged("replaced")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.methods(), vec!["TacoService.Count", "TacoService.EatTaco"]);
    }

    #[test]
    fn test_register_rejects_unroutable_names() {
        let mut table = table();
        for (service, method) in [("Taco/Service", "EatTaco"), ("Taco.Service", "Eat"), ("", "EatTaco"), ("TacoService", "")] {
            let err = table.register(service, method, tagged("bad")).unwrap_err();
            assert!(matches!(err, RpcError::InvalidMethod(_)), "{err:?}");
        }
        assert_eq!(table.methods(), vec!["TacoService.Count", "TacoService.EatTaco"]);
    }

    #[tokio::test]
    async fn test_router_dispatch() {
        let app = table().into_router();
        let resp = app
            .oneshot(
                Request::post("/oto/TacoService.EatTaco")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(text(resp).await, "eat");
    }

    #[tokio::test]
    async fn test_dispatch_not_found_envelope() {
        let table = table();
        let resp = table
            .dispatch(Request::post("/oto/Unknown.Method").body(Body::empty()).unwrap())
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let env: ErrorEnvelope = serde_json::from_str(&text(resp).await).unwrap();
        assert_eq!(env.error, "not found: /oto/Unknown.Method");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let table = table().with_body_limit(8);
        let resp = table
            .dispatch(
                Request::post("/oto/TacoService.EatTaco")
                    .body(Body::from(vec![b'x'; 64]))
                    .unwrap(),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_handler_sees_deadline() {
        let mut table = DispatchTable::new().with_request_timeout(Duration::from_secs(5));
        table.register("Clock", "Deadline", |ctx: Context, req: RpcRequest| async move {
            format!("{} {}", req.method, ctx.deadline().is_some()).into_response()
        })
        .unwrap();
        let resp = table
            .dispatch(Request::post("/oto/Clock.Deadline").body(Body::empty()).unwrap())
            .await;
        assert_eq!(text(resp).await, "Clock.Deadline true");
    }

    fn empty() -> RpcRequest {
        RpcRequest {
            method: String::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}
