//! Authoring new posts.

use std::sync::{Arc, Mutex, PoisonError};

use gitconnect_api::FeedApi;
use gitconnect_model::Post;

use crate::error::{FeedError, Result, ValidationError};
use crate::feed::FeedStore;
use crate::session::SessionGate;

/// Submits posts and places them at the head of the feed.
pub struct PostComposer<A> {
    api: Arc<A>,
    gate: Arc<SessionGate>,
    feed: Arc<FeedStore<A>>,
    draft: Mutex<String>,
}

impl<A: FeedApi> PostComposer<A> {
    pub fn new(api: Arc<A>, gate: Arc<SessionGate>, feed: Arc<FeedStore<A>>) -> Self {
        Self {
            api,
            gate,
            feed,
            draft: Mutex::new(String::new()),
        }
    }

    /// Creates a post and prepends it to the feed.
    ///
    /// The new entry takes id, content and timestamp from the service and
    /// the author from the local session. It starts with zero counts.
    pub async fn submit(&self, content: &str) -> Result<Post> {
        let session = self.gate.current_session();
        let Some(token) = session.bearer() else {
            return Err(FeedError::Unauthenticated);
        };
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }

        tracing::debug!("Creating post ({} chars)", content.len());
        let wire = self
            .api
            .create_post(token, content)
            .await
            .inspect_err(|err| tracing::warn!("Failed to create post: {}", err))?;

        let post = Post {
            like_count: 0,
            dislike_count: 0,
            ..wire.into_post(session.display_name.clone())
        };
        self.feed.prepend(post.clone());
        tracing::info!("Created post {}", post.id);
        Ok(post)
    }

    /// Replaces the pending draft.
    pub fn set_draft(&self, content: impl Into<String>) {
        *self.draft.lock().unwrap_or_else(PoisonError::into_inner) = content.into();
    }

    pub fn draft(&self) -> String {
        self.draft
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Submits the draft, clearing it only when the post was created.
    pub async fn submit_draft(&self) -> Result<Post> {
        let draft = self.draft();
        let post = self.submit(&draft).await?;

        let mut current = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        // Keep edits made while the request was in flight.
        if *current == draft {
            current.clear();
        }
        Ok(post)
    }
}
