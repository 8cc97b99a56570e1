//! Hierarchical cancellation signal.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::watch;

/// A cloneable cancellation signal.
///
/// Clones share the same signal. [`CancelToken::child`] creates a dependent
/// token: cancelling a parent cancels every child, cancelling a child leaves
/// the parent untouched.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Node>,
}

struct Node {
    state: watch::Sender<bool>,
    children: Mutex<Vec<Weak<Node>>>,
}

impl Node {
    fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state,
            children: Mutex::new(Vec::new()),
        }
    }

    fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    fn cancel(&self) {
        let children = {
            let mut children = self
                .children
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if self.state.send_replace(true) {
                return;
            }
            std::mem::take(&mut *children)
        };

        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

impl CancelToken {
    /// Creates a new, uncancelled root token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Node::new()),
        }
    }

    /// Creates a child token that is cancelled together with `self`.
    ///
    /// A child of an already-cancelled token starts out cancelled.
    pub fn child(&self) -> Self {
        let node = Arc::new(Node::new());

        let mut children = self
            .inner
            .children
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.inner.is_cancelled() {
            node.state.send_replace(true);
        } else {
            children.retain(|child| child.strong_count() > 0);
            children.push(Arc::downgrade(&node));
        }
        drop(children);

        Self { inner: node }
    }

    /// Cancels this token and all of its descendants. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.inner.state.subscribe();
        // `self` keeps the sender alive, so the channel cannot close while waiting.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Returns a guard that cancels the token when dropped.
    pub fn drop_guard(&self) -> CancelGuard {
        CancelGuard {
            token: self.clone(),
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Cancels its token on drop, covering every exit path of the owning scope.
#[derive(Debug)]
pub struct CancelGuard {
    token: CancelToken,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_token_is_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();

        token.cancel();

        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_parent_cancel_propagates_to_children() {
        let parent = CancelToken::new();
        let child = parent.child();
        let grandchild = child.child();

        parent.cancel();

        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
    }

    #[test]
    fn test_child_cancel_does_not_affect_parent() {
        let parent = CancelToken::new();
        let child = parent.child();

        child.cancel();

        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn test_child_of_cancelled_parent_starts_cancelled() {
        let parent = CancelToken::new();
        parent.cancel();

        assert!(parent.child().is_cancelled());
    }

    #[test]
    fn test_drop_guard_cancels() {
        let token = CancelToken::new();
        {
            let _guard = token.drop_guard();
            assert!(!token.is_cancelled());
        }
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let token = CancelToken::new();
        let waiter = token.clone();

        let handle = tokio::spawn(async move { waiter.cancelled().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("cancelled() should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_resolves_immediately_when_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();

        tokio::time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .expect("already-cancelled token should resolve immediately");
    }
}
