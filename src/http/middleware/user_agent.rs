//! Logs the User-Agent of inbound requests.

use axum::body::Body;
use axum::http::header::USER_AGENT;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log the caller's User-Agent, when it sent one, then continue.
pub async fn log_user_agent(request: Request<Body>, next: Next) -> Response {
    if let Some(agent) = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        tracing::info!(user_agent = %agent, path = %request.uri().path(), "Request received");
    }
    next.run(request).await
}
