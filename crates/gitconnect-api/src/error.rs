//! Error types for calls against the GitConnect service.

use thiserror::Error;

/// Errors that can occur while talking to the service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The configured base URL could not be parsed.
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connection, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("service error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl ApiError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => {
                "Could not reach GitConnect. Please check your internet connection."
            }
            Self::Status { status: 401, .. } => "Your session has expired. Please log in again.",
            Self::Status { status: 404, .. } => "The requested item could not be found.",
            Self::Status { message, .. } if !message.trim().is_empty() => message,
            Self::Status { .. } => "The service could not complete the request.",
            Self::InvalidUrl(_) => "The service address is not configured correctly.",
            Self::JsonParse(_) => "The service sent an unexpected response.",
        }
    }

    /// HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::JsonParse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for service calls.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.user_message().contains("internet connection"));

        let err = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.user_message().contains("log in again"));

        let err = ApiError::Status {
            status: 400,
            message: "Invalid email or password".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid email or password");

        let err = ApiError::Status {
            status: 500,
            message: "  ".to_string(),
        };
        assert!(err.user_message().contains("could not complete"));
    }

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Status {
            status: 404,
            message: "Post not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Network("x".to_string()).status(), None);
    }
}
