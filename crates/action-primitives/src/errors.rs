//! Error types for action primitives

use thiserror::Error;

/// Error types for DOM primitive operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Element could not be found for the selector
    #[error("Element not found: {0}")]
    AnchorNotFound(String),

    /// Element exists but cannot receive the interaction
    #[error("Element not interactable: {0}")]
    NotInteractable(String),

    /// Page script evaluation failed or returned an unexpected shape
    #[error("Script error: {0}")]
    Script(String),

    /// The host page or browser refused the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// CDP communication or protocol error
    #[error("CDP I/O error: {0}")]
    CdpIo(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ActionError {
    /// Check if the next poll may succeed where this one failed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ActionError::AnchorNotFound(_) | ActionError::NotInteractable(_) | ActionError::CdpIo(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_elements_are_retryable() {
        assert!(ActionError::AnchorNotFound("#x".into()).is_retryable());
        assert!(!ActionError::PermissionDenied("storage".into()).is_retryable());
        assert!(!ActionError::Script("boom".into()).is_retryable());
    }
}
