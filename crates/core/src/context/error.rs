use thiserror::Error;

/// Reasons a request context can end before its work completes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("Request cancelled")]
    Cancelled,
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_error_display() {
        assert_eq!(ContextError::Cancelled.to_string(), "Request cancelled");
        assert_eq!(
            ContextError::DeadlineExceeded.to_string(),
            "Request deadline exceeded"
        );
    }
}
