// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Tags every HTTP request span with its request id, method, and path

use axum::body::Body;
use axum::http::Request;
use tracing::Span;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the span `TraceLayer` opens for each request
///
/// The request id is set upstream by `SetRequestIdLayer`, so it is always
/// present unless the layer order changes.
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
