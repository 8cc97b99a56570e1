//! Axum extractor for RequestContext.

use std::convert::Infallible;
use std::ops::Deref;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use cookbook_core::context::{RequestContext, RequestId};

/// Header carrying the correlation id, read from requests and echoed on responses.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header older clients send the correlation id in.
const LEGACY_REQUEST_ID_HEADER: &str = "request_id";

/// Reads the caller's correlation id, or generates a fresh one.
///
/// Any non-blank value is kept. Bytes that are not valid UTF-8 are replaced
/// with U+FFFD rather than discarding the id.
pub fn extract_request_id(headers: &HeaderMap) -> RequestId {
    [REQUEST_ID_HEADER, LEGACY_REQUEST_ID_HEADER]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .find_map(|v| RequestId::from_header(&String::from_utf8_lossy(v.as_bytes())))
        .unwrap_or_else(RequestId::new)
}

/// The request's [`RequestContext`].
///
/// Taken from the request extensions when a lifecycle middleware attached one;
/// otherwise built from the headers with no deadline.
#[derive(Debug, Clone)]
pub struct Context(pub RequestContext);

impl Deref for Context {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(|| {
                RequestContext::new().with_request_id(extract_request_id(&parts.headers))
            });
        Ok(Context(ctx))
    }
}
