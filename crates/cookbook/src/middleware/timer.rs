use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use cookbook_core::context::RequestContext;

use crate::stats::{elapsed_ms, Stats};

/// Logs and records how long the inner service took, whatever the outcome.
///
/// Endpoints are keyed by method and route template so ids in the path do
/// not multiply the counters.
pub async fn timer(State(stats): State<Arc<Stats>>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let request_id = req
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id().to_string())
        .unwrap_or_default();

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed = start.elapsed();

    tracing::info!(
        path = %path,
        method = %method,
        status = response.status().as_u16(),
        elapsed_ms = elapsed_ms(elapsed),
        request_id = %request_id,
        "Request completed"
    );

    stats.record(&format!("{method} {route}"), response.status(), elapsed);

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_records_by_route_template() {
        let stats = Arc::new(Stats::new("cookbook", "test", "127.0.0.1"));
        let app = Router::new()
            .route("/recipe/{id}", get(|| async { StatusCode::NOT_FOUND }))
            .layer(middleware::from_fn_with_state(stats.clone(), timer));

        for id in ["a", "b"] {
            app.clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/recipe/{id}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
        }

        let snapshot = stats.snapshot();
        let endpoint = &snapshot.endpoints["GET /recipe/{id}"];
        assert_eq!(endpoint.requests, 2);
        assert_eq!(endpoint.not_found, 2);
    }
}
