use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use cookbook_core::context::RequestContext;

use crate::context::{extract_request_id, REQUEST_ID_HEADER};

/// Assigns the correlation id and attaches the root [`RequestContext`].
///
/// A caller-supplied id is kept as-is. The id is echoed back in the
/// `x-request-id` response header and recorded on a `request` span.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let ctx = match req.extensions().get::<RequestContext>() {
        Some(ctx) => ctx.clone(),
        None => RequestContext::new().with_request_id(extract_request_id(req.headers())),
    };
    let id = ctx.request_id().clone();
    req.extensions_mut().insert(ctx);

    let span = tracing::info_span!("request", request_id = %id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        response
            .headers_mut()
            .entry(HeaderName::from_static(REQUEST_ID_HEADER))
            .or_insert(value);
    }

    response
}
