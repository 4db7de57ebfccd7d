//! The feed store: sole owner of the post collection.
//!
//! Controllers never keep their own copies of posts. They address the
//! canonical entry by id through [`FeedStore::apply_post_update`], which
//! merges fields in place and never moves an entry. Responses for posts no
//! longer in the collection (removed by a reload, for instance) are dropped.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gitconnect_api::{FeedApi, WirePost};
use gitconnect_model::{Post, PostId, PostPatch};

use crate::error::Result;
use crate::session::SessionGate;

/// Author shown when the service did not embed one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Ordered post collection, newest first.
pub struct FeedStore<A> {
    api: Arc<A>,
    gate: Arc<SessionGate>,
    posts: Mutex<Vec<Post>>,
}

impl<A: FeedApi> FeedStore<A> {
    pub fn new(api: Arc<A>, gate: Arc<SessionGate>) -> Self {
        Self {
            api,
            gate,
            posts: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Post>> {
        self.posts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the full collection and replaces the local one.
    ///
    /// On failure the collection is emptied and the error returned; the
    /// load is not retried.
    pub async fn load(&self) -> Result<Vec<Post>> {
        let session = self.gate.current_session();

        match self.api.list_posts(session.bearer()).await {
            Ok(wire) => {
                let posts = into_feed(wire);
                tracing::info!("Loaded {} posts", posts.len());
                *self.lock() = posts.clone();
                Ok(posts)
            }
            Err(err) => {
                tracing::warn!("Failed to load posts: {}", err);
                self.lock().clear();
                Err(err.into())
            }
        }
    }

    /// Inserts a freshly authored post at the head.
    pub fn prepend(&self, post: Post) {
        tracing::debug!("Prepending post {}", post.id);
        self.lock().insert(0, post);
    }

    /// Merges `patch` into the post with the given id, in place.
    ///
    /// Returns `false`, without failing, when the post is not in the
    /// collection.
    pub fn apply_post_update(&self, id: &PostId, patch: &PostPatch) -> bool {
        let mut posts = self.lock();
        match posts.iter_mut().find(|post| &post.id == id) {
            Some(post) => {
                post.apply(patch);
                tracing::debug!(
                    "Post {} now has {} likes, {} dislikes",
                    id,
                    post.like_count,
                    post.dislike_count
                );
                true
            }
            None => {
                tracing::warn!("Dropping update for post {} (no longer in feed)", id);
                false
            }
        }
    }

    /// Re-fetches one post and merges its counts.
    ///
    /// Returns the merged post, or `None` if it left the collection while
    /// the request was in flight. The session's reaction state is kept.
    pub async fn refresh_post(&self, id: &PostId) -> Result<Option<Post>> {
        let session = self.gate.current_session();
        let wire = self
            .api
            .get_post(session.bearer(), id)
            .await
            .inspect_err(|err| tracing::warn!("Failed to refresh post {}: {}", id, err))?;

        let patch = PostPatch::counts(wire.likes, wire.dislikes);
        if self.apply_post_update(id, &patch) {
            Ok(self.get(id))
        } else {
            Ok(None)
        }
    }

    /// Snapshot of the collection.
    pub fn posts(&self) -> Vec<Post> {
        self.lock().clone()
    }

    /// Snapshot of one post.
    pub fn get(&self, id: &PostId) -> Option<Post> {
        self.lock().iter().find(|post| &post.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Converts a service listing into feed order: newest first, unique ids.
fn into_feed(wire: Vec<WirePost>) -> Vec<Post> {
    let mut seen = HashSet::new();
    let mut posts: Vec<Post> = wire
        .into_iter()
        .filter(|post| {
            let fresh = seen.insert(post.id.clone());
            if !fresh {
                tracing::warn!("Ignoring duplicate post {} in listing", post.id);
            }
            fresh
        })
        .map(|post| {
            let author = post.author().unwrap_or(UNKNOWN_AUTHOR).to_string();
            post.into_post(author)
        })
        .collect();

    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}
