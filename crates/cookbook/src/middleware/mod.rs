//! Request lifecycle middleware.
//!
//! Each layer is an `axum::middleware::from_fn` function and they stack in any
//! order. The router applies them outermost first:
//!
//! 1. [`request_id`] assigns the correlation id and the root [`RequestContext`].
//! 2. [`timer`] logs and records elapsed time for every response.
//! 3. [`deadline`] bounds the context with a per-route timeout.
//!
//! [`RequestContext`]: cookbook_core::context::RequestContext

mod deadline;
mod request_id;
mod timer;

pub use deadline::deadline;
pub use request_id::request_id;
pub use timer::timer;
