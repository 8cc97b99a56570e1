use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use super::{CancelToken, ContextError};

/// Correlation identifier for a request, used for tracing and logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts a caller-supplied identifier verbatim.
    ///
    /// Returns `None` only for blank values.
    pub fn from_header(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            return None;
        }
        Some(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request-scoped execution context.
///
/// Cloning is cheap and clones share the same cancellation signal. Derived
/// contexts ([`RequestContext::with_timeout`], [`RequestContext::child`]) get
/// their own token, cancelled together with the parent's.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    deadline: Option<Instant>,
    cancel: CancelToken,
}

impl RequestContext {
    /// Creates a root context with a fresh request id and no deadline.
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            deadline: None,
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the correlation id.
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Derives a child context sharing the id and deadline of `self`.
    pub fn child(&self) -> Self {
        Self {
            request_id: self.request_id.clone(),
            deadline: self.deadline,
            cancel: self.cancel.child(),
        }
    }

    /// Derives a child context that expires at `deadline`.
    ///
    /// An earlier deadline inherited from `self` is kept.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let mut child = self.child();
        child.deadline = Some(match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        });
        child
    }

    /// Derives a child context that expires `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.child(),
        }
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns why the context has ended, if it has.
    pub fn err(&self) -> Option<ContextError> {
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(ContextError::DeadlineExceeded);
        }
        if self.cancel.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        None
    }

    /// Fails if the context has been cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), ContextError> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Resolves when the context ends, returning the reason.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                () = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
                () = self.cancel.cancelled() => ContextError::Cancelled,
            },
            None => {
                self.cancel.cancelled().await;
                ContextError::Cancelled
            }
        }
    }

    /// Runs `fut` bounded by this context.
    ///
    /// Fails without polling `fut` if the context has already ended; otherwise
    /// drops `fut` as soon as the context ends.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, ContextError>
    where
        F: Future,
    {
        self.check()?;
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            output = fut => Ok(output),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_new_is_uuid() {
        let id = RequestId::new();
        Uuid::parse_str(id.as_str()).expect("Should be valid UUID");
    }

    #[test]
    fn test_request_id_from_header_keeps_caller_value() {
        let id = RequestId::from_header("req-abc-123").unwrap();
        assert_eq!(id.as_str(), "req-abc-123");
    }

    #[test]
    fn test_request_id_from_header_rejects_blank() {
        assert!(RequestId::from_header("").is_none());
        assert!(RequestId::from_header("   ").is_none());
    }

    #[test]
    fn test_request_id_from_header_keeps_spaces_and_long_values() {
        let spaced = RequestId::from_header("trace id with spaces").unwrap();
        assert_eq!(spaced.as_str(), "trace id with spaces");

        let long = "x".repeat(200);
        assert_eq!(RequestId::from_header(&long).unwrap().as_str(), long);
    }

    #[test]
    fn test_new_context_is_live() {
        let ctx = RequestContext::new();
        assert!(ctx.deadline().is_none());
        assert_eq!(ctx.check(), Ok(()));
    }

    #[test]
    fn test_child_keeps_request_id() {
        let id = RequestId::from_header("trace-me").unwrap();
        let ctx = RequestContext::new().with_request_id(id.clone());

        assert_eq!(ctx.with_timeout(Duration::from_secs(1)).request_id(), &id);
    }

    #[test]
    fn test_cancelled_context_fails_check() {
        let ctx = RequestContext::new();
        ctx.cancel();
        assert_eq!(ctx.check(), Err(ContextError::Cancelled));
    }

    #[test]
    fn test_parent_cancel_reaches_derived_context() {
        let parent = RequestContext::new();
        let child = parent.with_timeout(Duration::from_secs(60));

        parent.cancel();

        assert_eq!(child.check(), Err(ContextError::Cancelled));
    }

    #[test]
    fn test_child_cancel_leaves_parent_live() {
        let parent = RequestContext::new();
        let child = parent.with_timeout(Duration::from_secs(60));

        child.cancel();

        assert_eq!(parent.check(), Ok(()));
    }

    #[tokio::test]
    async fn test_past_deadline_fails_check() {
        let ctx = RequestContext::new().with_deadline(Instant::now() - Duration::from_millis(1));
        assert_eq!(ctx.check(), Err(ContextError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_with_timeout_never_extends_parent_deadline() {
        let parent = RequestContext::new().with_timeout(Duration::from_millis(50));
        let child = parent.with_timeout(Duration::from_secs(60));

        assert_eq!(child.deadline(), parent.deadline());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_deadline_exceeded_for_slow_future() {
        let ctx = RequestContext::new().with_timeout(Duration::from_millis(100));

        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(10)))
            .await;

        assert_eq!(result, Err(ContextError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_run_returns_output_for_fast_future() {
        let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
        let result = ctx.run(async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_run_does_not_poll_future_when_already_cancelled() {
        let ctx = RequestContext::new();
        ctx.cancel();

        let mut polled = false;
        let result = ctx.run(async { polled = true }).await;

        assert_eq!(result, Err(ContextError::Cancelled));
        assert!(!polled);
    }

    #[tokio::test]
    async fn test_run_stops_when_cancelled_midway() {
        let ctx = RequestContext::new();
        let canceller = ctx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = ctx.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(ContextError::Cancelled));
    }
}
