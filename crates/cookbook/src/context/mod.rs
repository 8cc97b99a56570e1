//! Request-scoped context extraction.
//!
//! The lifecycle middleware attach a [`RequestContext`] to each request; the
//! [`Context`] extractor hands it to handlers.

mod extractor;

pub use extractor::{extract_request_id, Context, REQUEST_ID_HEADER};
