//! Error types for the client core.
//!
//! Errors fall into three classes. `Unauthenticated` and empty-content
//! validation failures are suppressed: the action simply has no effect and
//! the UI shows nothing. Everything else is surfaced, either in a dedicated
//! error slot or as a log line, and never retried automatically.

use std::path::PathBuf;

use gitconnect_api::ApiError;
use thiserror::Error;

/// Input rejected before any network call was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Post or comment content is empty after trimming.
    #[error("content is empty")]
    EmptyContent,

    /// A required form field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Registration password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The session carries a token but no user id.
    #[error("no user id in the current session")]
    MissingUserId,
}

/// Errors returned by core operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// No session token at call time. Suppressed.
    #[error("not authenticated")]
    Unauthenticated,

    /// Input failed client-side validation.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Non-success response or transport error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service rejected a login attempt.
    #[error("login failed: {0}")]
    LoginFailed(#[source] ApiError),

    /// Local state file I/O error.
    #[error("Failed to {operation} local state file: {path}")]
    Store {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local state file could not be (de)serialized.
    #[error("Invalid local state file {path}: {reason}")]
    StoreFormat { path: PathBuf, reason: String },
}

impl FeedError {
    /// True for failures the UI must not display.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated | Self::ValidationFailed(ValidationError::EmptyContent)
        )
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Please log in first.".to_string(),
            Self::ValidationFailed(ValidationError::PasswordMismatch) => {
                "Passwords do not match.".to_string()
            }
            Self::ValidationFailed(ValidationError::MissingUserId) => {
                "User ID not found. Please log in again.".to_string()
            }
            Self::ValidationFailed(err) => {
                let text = err.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
                    None => text,
                }
            }
            Self::Api(err) => err.user_message().to_string(),
            Self::LoginFailed(ApiError::Status { message, .. }) if !message.trim().is_empty() => {
                message.clone()
            }
            Self::LoginFailed(_) => "Login failed.".to_string(),
            Self::Store { path, .. } | Self::StoreFormat { path, .. } => {
                format!("Could not access local settings at {}", path.display())
            }
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_errors() {
        assert!(FeedError::Unauthenticated.is_silent());
        assert!(FeedError::from(ValidationError::EmptyContent).is_silent());
        assert!(!FeedError::from(ValidationError::PasswordMismatch).is_silent());
        assert!(!FeedError::from(ApiError::Network("down".to_string())).is_silent());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            FeedError::from(ValidationError::PasswordMismatch).user_message(),
            "Passwords do not match."
        );
        assert_eq!(
            FeedError::from(ValidationError::MissingField("full name")).user_message(),
            "Full name is required."
        );
        let err = FeedError::from(ApiError::Status {
            status: 400,
            message: "Invalid email or password".to_string(),
        });
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[test]
    fn test_login_failure_messages() {
        let rejected = FeedError::LoginFailed(ApiError::Status {
            status: 401,
            message: "Invalid credentials".to_string(),
        });
        assert_eq!(rejected.user_message(), "Invalid credentials");

        let unreachable = FeedError::LoginFailed(ApiError::Network("timeout".to_string()));
        assert_eq!(unreachable.user_message(), "Login failed.");
        assert!(!unreachable.is_silent());
    }
}
