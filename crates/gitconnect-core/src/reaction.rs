//! Like/dislike submission and reconciliation.
//!
//! Reactions are not optimistic about numbers: the service alone decides
//! whether a reaction toggles, replaces or accumulates, so the client waits
//! for the authoritative counts and overwrites its own with them. The only
//! thing shown before the response is a pending marker
//! ([`ReactionController::is_pending`]).
//!
//! When several reactions to one post are in flight, responses are applied
//! as they arrive and the last one applied wins. With
//! [`ReconcileOrder::RequestOrder`] each request carries a per-post sequence
//! number and responses older than the last applied one are dropped instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gitconnect_api::{ApiError, FeedApi, ReactionCounts};
use gitconnect_model::{PostId, PostPatch, ReactionKind, ReactionState};

use crate::config::ReconcileOrder;
use crate::error::{FeedError, Result};
use crate::feed::FeedStore;
use crate::session::SessionGate;

/// Per-post bookkeeping for requests in flight.
#[derive(Debug, Default)]
struct ReactionStream {
    in_flight: usize,
    next_seq: u64,
    last_applied: Option<u64>,
}

/// Submits reactions and merges the service's counts into the feed.
pub struct ReactionController<A> {
    api: Arc<A>,
    gate: Arc<SessionGate>,
    feed: Arc<FeedStore<A>>,
    order: ReconcileOrder,
    streams: Mutex<HashMap<PostId, ReactionStream>>,
}

impl<A: FeedApi> ReactionController<A> {
    pub fn new(
        api: Arc<A>,
        gate: Arc<SessionGate>,
        feed: Arc<FeedStore<A>>,
        order: ReconcileOrder,
    ) -> Self {
        Self {
            api,
            gate,
            feed,
            order,
            streams: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PostId, ReactionStream>> {
        self.streams.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submits a reaction and applies the authoritative counts.
    ///
    /// Returns the counts reported by the service. Without a session this is
    /// a silent no-op: no request, no state change. On failure the post is
    /// left exactly as it was.
    pub async fn react(&self, post_id: &PostId, kind: ReactionKind) -> Result<ReactionCounts> {
        let session = self.gate.current_session();
        let Some(token) = session.bearer() else {
            tracing::debug!("Ignoring {} on post {}: not authenticated", kind, post_id);
            return Err(FeedError::Unauthenticated);
        };

        let seq = self.begin(post_id);
        tracing::debug!("Sending {} for post {} (seq {})", kind, post_id, seq);
        let result = self.api.react(token, post_id, kind).await;
        self.finish(post_id, seq, kind, result)
    }

    /// Whether any reaction to this post awaits its response.
    pub fn is_pending(&self, post_id: &PostId) -> bool {
        self.lock()
            .get(post_id)
            .is_some_and(|stream| stream.in_flight > 0)
    }

    fn begin(&self, post_id: &PostId) -> u64 {
        let mut streams = self.lock();
        let stream = streams.entry(post_id.clone()).or_default();
        stream.in_flight += 1;
        let seq = stream.next_seq;
        stream.next_seq += 1;
        seq
    }

    fn finish(
        &self,
        post_id: &PostId,
        seq: u64,
        kind: ReactionKind,
        result: std::result::Result<ReactionCounts, ApiError>,
    ) -> Result<ReactionCounts> {
        // Held through the feed update. Lock order: streams, then feed.
        let mut streams = self.lock();
        let stream = streams.entry(post_id.clone()).or_default();
        stream.in_flight = stream.in_flight.saturating_sub(1);

        let superseded = result.is_ok()
            && self.order == ReconcileOrder::RequestOrder
            && stream.last_applied.is_some_and(|last| last > seq);
        if result.is_ok() && !superseded {
            stream.last_applied = Some(seq);
        }
        if stream.in_flight == 0 {
            streams.remove(post_id);
        }

        let counts = result.inspect_err(|err| {
            tracing::warn!("Failed to {} post {}: {}", kind, post_id, err);
        })?;

        if superseded {
            tracing::debug!(
                "Dropping {} response for post {} (seq {} superseded)",
                kind,
                post_id,
                seq
            );
            return Ok(counts);
        }

        let patch = PostPatch::counts(counts.likes, counts.dislikes)
            .with_reaction_state(ReactionState::from(kind));
        if self.feed.apply_post_update(post_id, &patch) {
            tracing::info!("Applied {} response for post {}", kind, post_id);
        }
        Ok(counts)
    }
}
