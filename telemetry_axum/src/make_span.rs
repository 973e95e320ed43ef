use std::time::Duration;

use axum::extract::{MatchedPath, Request};
use axum::response::Response;
use tracing::Span;

/// Request span named after the matched route so server function calls group
/// by endpoint instead of by raw URI.
pub fn make_span(request: &Request) -> Span {
    let method = request.method();
    let uri = request.uri();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or_else(|| uri.path());

    tracing::info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        route = route,
        status_code = tracing::field::Empty,
    )
}

pub fn on_response(response: &Response, latency: Duration, span: &Span) {
    span.record("status_code", response.status().as_u16());
    tracing::info!(
        status_code = response.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        "request completed"
    );
}
