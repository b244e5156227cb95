//! Gateway router - hands every HTTP request to the hosted worker
//!
//! There are no gateway-owned routes: every path and method belongs to the
//! worker, so an object key such as `health` is a key like any other.

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;

use edge_demos_sdk::Response as WorkerResponse;

use crate::runtime::{Context, RequestId};
use crate::AppState;

/// Header carrying a caller-supplied request id
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the gateway router that handles all incoming requests
pub fn create_gateway_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", any(handle_gateway_request))
        .route("/{*path}", any(handle_gateway_request))
}

/// Handle an incoming gateway request with the configured worker
async fn handle_gateway_request(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Response {
    let caller_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty());
    let ctx = match caller_id {
        Some(id) => {
            Context::with_request_id(state.env.clone(), RequestId::from_string(id.to_string()))
        }
        None => Context::new(state.env.clone()),
    };

    let (parts, body) = request.into_parts();

    tracing::debug!(
        request_id = %ctx.request_id,
        worker = %state.config.worker,
        method = %parts.method,
        path = %parts.uri.path(),
        "Incoming request"
    );

    // Objects are stored whole; the body is not size-limited here
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(request_id = %ctx.request_id, "Failed to read body: {}", e);
            return (StatusCode::BAD_REQUEST, "Failed to read body").into_response();
        }
    };

    let worker_request = edge_demos_sdk::Request {
        method: parts.method,
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        body,
        request_id: ctx.request_id.as_str().to_string(),
    };

    let handler = state.config.worker.handler();
    let response = match handler(ctx.env, worker_request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %ctx.request_id, "Handler error: {}", e);
            e.into_response()
        }
    };

    tracing::debug!(request_id = %ctx.request_id, status = response.status, "Request completed");

    into_http_response(response)
}

/// Convert a worker response into an axum response
fn into_http_response(response: WorkerResponse) -> Response {
    let mut out = Response::new(Body::from(response.body));
    *out.status_mut() =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    *out.headers_mut() = response.headers;
    out
}
