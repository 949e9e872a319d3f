use thiserror::Error;

/// Unified error type for branch-suggest operations
#[derive(Error, Debug)]
pub enum BranchSuggestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository must be in format \"owner/repo\" (got '{0}')")]
    InvalidRepository(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in branch-suggest
pub type Result<T> = std::result::Result<T, BranchSuggestError>;

impl BranchSuggestError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BranchSuggestError::Config(msg.into())
    }

    /// Create a repository-format error for the offending string
    pub fn invalid_repository(repo: impl Into<String>) -> Self {
        BranchSuggestError::InvalidRepository(repo.into())
    }
}
