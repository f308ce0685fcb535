use serde::Serialize;
use thiserror::Error;

/// Unified error type for the patchdrift pipeline.
///
/// Fatal errors propagate unmodified to the top-level caller, which reports
/// them and exits non-zero; no partial report is written.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    #[error("Git error: {message}")]
    Git { message: String, operation: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },
}

impl AppError {
    /// Create a Git error with operation context
    pub fn git(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Git {
            message: message.into(),
            operation: operation.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a Not Found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

impl From<crate::sources::git::GitError> for AppError {
    fn from(err: crate::sources::git::GitError) -> Self {
        use crate::sources::git::GitError;
        match err {
            GitError::Git { message, operation } => AppError::git(message, operation),
            GitError::Io(e) => AppError::io(e.to_string()),
            GitError::NotARepo => AppError::not_found("git repository"),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::io(err.to_string())
    }
}

// Convert to String for the CLI boundary
impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
