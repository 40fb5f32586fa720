use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::{sync::Arc, time::Instant};
use tracing::{error, info, Instrument};

use super::Metrics;

/// Middleware for automatic request tracing and metrics collection
pub async fn observability_middleware(
    metrics: Arc<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    // Prefer the matched route so metrics group by endpoint, not by raw path.
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| uri.clone());

    let span = tracing::info_span!(
        "http_request",
        http.method = %method,
        http.route = %endpoint,
        http.url = %uri,
        http.status_code = tracing::field::Empty,
    );

    async {
        metrics.increment_in_flight(&method, &endpoint);

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status_code = response.status().as_u16();

        tracing::Span::current().record("http.status_code", status_code);

        metrics.record_http_request(&method, &endpoint, status_code, duration.as_secs_f64());
        metrics.decrement_in_flight(&method, &endpoint);

        if status_code >= 500 {
            error!(
                method = %method,
                path = %endpoint,
                status_code = status_code,
                duration_ms = duration.as_millis(),
                "Request completed with error"
            );
        } else {
            info!(
                method = %method,
                path = %endpoint,
                status_code = status_code,
                duration_ms = duration.as_millis(),
                "Request completed"
            );
        }

        response
    }
    .instrument(span)
    .await
}
