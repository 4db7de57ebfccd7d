//! Wire types of the GitConnect REST contract.
//!
//! Response types are lenient: the service is written against loosely typed
//! JSON and omits or nulls fields freely, so everything the client can live
//! without is optional here and defaulted at the conversion boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use gitconnect_model::{Post, PostId, Profile, ReactionKind, ReactionState};

/// Nested user object embedded in posts and comments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireUser {
    /// Username, when the service preloaded the user.
    #[serde(default)]
    pub username: Option<String>,
}

/// A post as returned by `GET /posts`, `GET /posts/{id}` and `POST /posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePost {
    /// Post id.
    pub id: PostId,

    /// Post body.
    #[serde(default)]
    pub content: String,

    /// Creation timestamp.
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    /// Aggregate like count.
    #[serde(default)]
    pub likes: Option<u64>,

    /// Aggregate dislike count.
    #[serde(default)]
    pub dislikes: Option<u64>,

    /// Author, when preloaded.
    #[serde(default)]
    pub user: Option<WireUser>,
}

impl WirePost {
    /// Author username, if the service embedded a non-blank one.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    /// Converts into a feed entry attributed to `author_name`.
    ///
    /// The session's reaction is unknown to the service, so it starts as
    /// [`ReactionState::None`]. An undated post gets the earliest possible
    /// timestamp and therefore sorts after every dated one.
    #[must_use]
    pub fn into_post(self, author_name: String) -> Post {
        Post {
            id: self.id,
            author_name,
            content: self.content,
            created_at: self.created_at.unwrap_or(DateTime::<Utc>::MIN_UTC),
            like_count: self.likes.unwrap_or(0),
            dislike_count: self.dislikes.unwrap_or(0),
            reaction_state: ReactionState::None,
        }
    }
}

/// A comment as returned by the comment endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct WireComment {
    /// Comment body.
    #[serde(default)]
    pub content: String,

    /// Flat username field.
    #[serde(default)]
    pub username: Option<String>,

    /// Nested user, when preloaded.
    #[serde(default)]
    pub user: Option<WireUser>,
}

impl WireComment {
    /// Commenter name from either the flat or the nested field.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or_else(|| self.user.as_ref().and_then(|u| u.username.as_deref()))
            .filter(|name| !name.trim().is_empty())
    }
}

/// Counts returned by the like/dislike endpoints.
///
/// The service may return only the count it changed, so both are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    /// Authoritative like count, if reported.
    #[serde(default)]
    pub likes: Option<u64>,
    /// Authoritative dislike count, if reported.
    #[serde(default)]
    pub dislikes: Option<u64>,
}

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The logged-in user.
    pub user: LoginUser,
}

/// User part of a login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    /// User id, normalized to text.
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    /// Username.
    #[serde(default)]
    pub username: Option<String>,
}

// Envelopes and request bodies below are internal to the HTTP client.

#[derive(Debug, Deserialize)]
pub(crate) struct PostList {
    #[serde(default)]
    pub posts: Option<Vec<WirePost>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostEnvelope {
    pub post: WirePost,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentList {
    #[serde(default)]
    pub comments: Option<Vec<WireComment>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentEnvelope {
    pub comment: WireComment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileList {
    #[serde(default)]
    pub profiles: Option<Vec<Profile>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileEnvelope {
    pub profile: Profile,
}

/// Error body; the service uses `error`, some proxies use `message`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePostRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddCommentRequest<'a> {
    pub content: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReactionRequest {
    pub reaction: ReactionKind,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    PostId::deserialize(deserializer).map(|id| id.as_str().to_string())
}
