//! Comment threads and their reveal windows.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gitconnect_api::FeedApi;
use gitconnect_model::{ANONYMOUS_NAME, Comment, PostId, RevealWindow};

use crate::error::{FeedError, Result, ValidationError};
use crate::session::SessionGate;

#[derive(Debug, Default)]
struct CommentThread {
    comments: Vec<Comment>,
    loaded: bool,
    window: RevealWindow,
}

/// Loads, appends and reveals comments per post.
///
/// A thread is fetched at most once; after that the local sequence is
/// authoritative and only grows by local appends.
pub struct CommentController<A> {
    api: Arc<A>,
    gate: Arc<SessionGate>,
    threads: Mutex<HashMap<PostId, CommentThread>>,
}

impl<A: FeedApi> CommentController<A> {
    pub fn new(api: Arc<A>, gate: Arc<SessionGate>) -> Self {
        Self {
            api,
            gate,
            threads: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PostId, CommentThread>> {
        self.threads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the thread for a post, fetching it on first use.
    pub async fn load_comments(&self, post_id: &PostId) -> Result<Vec<Comment>> {
        if let Some(thread) = self.lock().get(post_id).filter(|t| t.loaded) {
            return Ok(thread.comments.clone());
        }

        let session = self.gate.current_session();
        let wire = self
            .api
            .list_comments(session.bearer(), post_id)
            .await
            .inspect_err(|err| {
                tracing::warn!("Failed to load comments for post {}: {}", post_id, err);
            })?;

        let mut threads = self.lock();
        let thread = threads.entry(post_id.clone()).or_default();
        if thread.loaded {
            // Another load finished first.
            return Ok(thread.comments.clone());
        }

        let mut comments: Vec<Comment> = wire
            .into_iter()
            .map(|comment| Comment {
                post_id: post_id.clone(),
                author: comment.author().unwrap_or(ANONYMOUS_NAME).to_string(),
                content: comment.content,
            })
            .collect();
        comments.append(&mut thread.comments);
        thread.comments = comments;
        thread.loaded = true;

        tracing::info!(
            "Loaded {} comments for post {}",
            thread.comments.len(),
            post_id
        );
        Ok(thread.comments.clone())
    }

    /// Posts a comment and appends it to the thread.
    ///
    /// The author shown is the local display name; only the content comes
    /// from the service's response.
    pub async fn add_comment(&self, post_id: &PostId, content: &str) -> Result<Comment> {
        let session = self.gate.current_session();
        let Some(token) = session.bearer() else {
            return Err(FeedError::Unauthenticated);
        };
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }

        tracing::debug!("Adding comment to post {}", post_id);
        let confirmed = self
            .api
            .add_comment(token, post_id, content, &session.display_name)
            .await
            .inspect_err(|err| {
                tracing::warn!("Failed to comment on post {}: {}", post_id, err);
            })?;

        let comment = Comment {
            post_id: post_id.clone(),
            author: session.display_name.clone(),
            content: confirmed.content,
        };
        self.lock()
            .entry(post_id.clone())
            .or_default()
            .comments
            .push(comment.clone());
        tracing::info!("Appended comment to post {}", post_id);
        Ok(comment)
    }

    /// Reveals the full thread. One-way.
    pub fn expand(&self, post_id: &PostId) {
        self.lock().entry(post_id.clone()).or_default().window.expand();
    }

    pub fn is_expanded(&self, post_id: &PostId) -> bool {
        self.lock()
            .get(post_id)
            .is_some_and(|thread| thread.window.is_expanded())
    }

    /// The comments currently shown for a post.
    pub fn visible_comments(&self, post_id: &PostId) -> Vec<Comment> {
        self.lock()
            .get(post_id)
            .map(|thread| thread.window.visible(&thread.comments).to_vec())
            .unwrap_or_default()
    }

    /// How many comments sit behind the "show more" affordance.
    pub fn hidden_count(&self, post_id: &PostId) -> usize {
        self.lock()
            .get(post_id)
            .map_or(0, |thread| thread.window.hidden_count(thread.comments.len()))
    }

    /// The whole thread as known locally.
    pub fn comments(&self, post_id: &PostId) -> Vec<Comment> {
        self.lock()
            .get(post_id)
            .map(|thread| thread.comments.clone())
            .unwrap_or_default()
    }
}
