//! The authenticated session as seen by the client.

use serde::{Deserialize, Serialize};

/// Name used when no username is known locally.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Snapshot of the current session.
///
/// Written only by the login/logout collaborator; every core component
/// treats it as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token, absent when logged out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Service-side user id, used for profile calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Name stitched onto locally authored posts and comments.
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

fn default_display_name() -> String {
    ANONYMOUS_NAME.to_string()
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    /// A logged-out session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            token: None,
            user_id: None,
            display_name: default_display_name(),
        }
    }

    /// A logged-in session.
    pub fn authenticated(
        token: impl Into<String>,
        user_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            token: Some(token.into()),
            user_id: Some(user_id.into()),
            display_name: display_name.into(),
        }
    }

    /// True when a non-empty token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }

    /// The token to send as `Authorization: Bearer`, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
