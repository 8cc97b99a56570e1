//! Request-scoped execution context.
//!
//! A [`RequestContext`] travels with every request from the transport layer
//! down into storage operations. It carries the correlation id, an optional
//! deadline, and a cancellation token. Repository implementations call
//! [`RequestContext::check`] before mutating state and wrap blocking work in
//! [`RequestContext::run`].

mod cancel;
mod error;
mod types;

pub use cancel::CancelToken;
pub use error::ContextError;
pub use types::{RequestContext, RequestId};
