//! Feed posts and reactions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a post.
///
/// The service hands out integer ids, but the client treats them as opaque:
/// both JSON numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as it appears in request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A reaction the user can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    /// Thumbs up.
    Like,
    /// Thumbs down.
    Dislike,
}

impl ReactionKind {
    /// Wire name, also used as the endpoint path segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current session's known reaction to a post.
///
/// Independent from the aggregate counts, which fold in every user's
/// reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionState {
    /// No reaction known for this session.
    #[default]
    None,
    /// The session liked the post.
    Liked,
    /// The session disliked the post.
    Disliked,
}

impl From<ReactionKind> for ReactionState {
    fn from(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => Self::Liked,
            ReactionKind::Dislike => Self::Disliked,
        }
    }
}

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique id within the feed.
    pub id: PostId,
    /// Display name of the author.
    pub author_name: String,
    /// Post body.
    pub content: String,
    /// When the service recorded the post.
    pub created_at: DateTime<Utc>,
    /// Authoritative like count.
    pub like_count: u64,
    /// Authoritative dislike count.
    pub dislike_count: u64,
    /// This session's reaction.
    pub reaction_state: ReactionState,
}

impl Post {
    /// Merges the fields present in `patch` into this post.
    ///
    /// Fields absent from the patch keep their current value.
    pub fn apply(&mut self, patch: &PostPatch) {
        if let Some(likes) = patch.like_count {
            self.like_count = likes;
        }
        if let Some(dislikes) = patch.dislike_count {
            self.dislike_count = dislikes;
        }
        if let Some(state) = patch.reaction_state {
            self.reaction_state = state;
        }
    }
}

/// Partial update addressed to a post by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostPatch {
    /// Replacement like count.
    pub like_count: Option<u64>,
    /// Replacement dislike count.
    pub dislike_count: Option<u64>,
    /// Replacement reaction state.
    pub reaction_state: Option<ReactionState>,
}

impl PostPatch {
    /// Patch replacing the counts that are present.
    #[must_use]
    pub fn counts(likes: Option<u64>, dislikes: Option<u64>) -> Self {
        Self {
            like_count: likes,
            dislike_count: dislikes,
            reaction_state: None,
        }
    }

    /// Sets the reaction state carried by this patch.
    #[must_use]
    pub fn with_reaction_state(mut self, state: ReactionState) -> Self {
        self.reaction_state = Some(state);
        self
    }

    /// True when applying the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.like_count.is_none() && self.dislike_count.is_none() && self.reaction_state.is_none()
    }
}
