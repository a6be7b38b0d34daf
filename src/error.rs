//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Malformed or unsupported principal
    #[error("Invalid principal: {0}")]
    InvalidPrincipal(String),

    /// No directory entry exists for the resolved account
    #[error("Account not found in directory: {0}")]
    AccountNotFound(String),

    /// Connection or bind to the directory service failed
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// Directory query exceeded the configured timeout
    #[error("Directory lookup timed out after {elapsed_ms}ms")]
    DirectoryTimeout {
        /// Time spent before the timeout fired
        elapsed_ms: u64,
    },
}

impl AuthzError {
    /// True for transient infrastructure failures, where a deny means
    /// "outage" rather than "denied by policy".
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AuthzError::DirectoryUnavailable(_) | AuthzError::DirectoryTimeout { .. }
        )
    }
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
