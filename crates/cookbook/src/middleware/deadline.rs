use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use cookbook_core::context::RequestContext;

use crate::context::extract_request_id;

/// Bounds the request's context by `timeout`.
///
/// The handler sees a child context whose deadline is the earlier of the
/// parent's and `now + timeout`. The child is cancelled when this middleware
/// returns or its future is dropped.
pub async fn deadline(State(timeout): State<Duration>, mut req: Request, next: Next) -> Response {
    let parent = match req.extensions().get::<RequestContext>() {
        Some(ctx) => ctx.clone(),
        None => RequestContext::new().with_request_id(extract_request_id(req.headers())),
    };
    let ctx = parent.with_timeout(timeout);
    let _guard = ctx.cancel_token().drop_guard();

    req.extensions_mut().insert(ctx);
    next.run(req).await
}
