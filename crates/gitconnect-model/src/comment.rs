//! Comments and the per-post reveal window.

use serde::{Deserialize, Serialize};

use crate::post::PostId;

/// A comment attached to a post.
///
/// The service guarantees no comment id, so a thread is an append-only
/// sequence in service order with locally added comments at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Post the comment belongs to.
    pub post_id: PostId,
    /// Display name of the commenter.
    pub author: String,
    /// Comment body.
    pub content: String,
}

/// How much of a comment thread is shown.
///
/// Collapsed shows only the most recent comment. Expanding is one-way for the
/// lifetime of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealWindow {
    expanded: bool,
}

impl RevealWindow {
    /// Whether the full thread is shown.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Shows the full thread. Calling it again has no further effect.
    pub fn expand(&mut self) {
        self.expanded = true;
    }

    /// The slice of `comments` currently shown.
    #[must_use]
    pub fn visible<'a>(&self, comments: &'a [Comment]) -> &'a [Comment] {
        if self.expanded {
            comments
        } else {
            &comments[comments.len().saturating_sub(1)..]
        }
    }

    /// Number of comments hidden behind a "show more" affordance.
    #[must_use]
    pub fn hidden_count(&self, total: usize) -> usize {
        if self.expanded {
            0
        } else {
            total.saturating_sub(1)
        }
    }
}
