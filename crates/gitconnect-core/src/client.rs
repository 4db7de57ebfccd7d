//! One client, one feed.

use std::sync::Arc;

use gitconnect_api::{FeedApi, HttpFeedApi};

use crate::auth::AuthService;
use crate::comment::CommentController;
use crate::composer::PostComposer;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::feed::FeedStore;
use crate::profile::ProfileService;
use crate::reaction::ReactionController;
use crate::session::{SessionGate, SessionSource, SessionStore};

/// Wires the gate, the feed store and the controllers over one service
/// client, so they all read and write the same post collection.
pub struct FeedClient<A> {
    api: Arc<A>,
    gate: Arc<SessionGate>,
    feed: Arc<FeedStore<A>>,
    reactions: ReactionController<A>,
    comments: CommentController<A>,
    composer: PostComposer<A>,
    profiles: ProfileService<A>,
}

impl<A: FeedApi> FeedClient<A> {
    pub fn new(api: Arc<A>, source: Arc<dyn SessionSource>, config: &ClientConfig) -> Self {
        let gate = Arc::new(SessionGate::new(source, config.poll_interval()));
        let feed = Arc::new(FeedStore::new(Arc::clone(&api), Arc::clone(&gate)));

        Self {
            reactions: ReactionController::new(
                Arc::clone(&api),
                Arc::clone(&gate),
                Arc::clone(&feed),
                config.reconcile_order,
            ),
            comments: CommentController::new(Arc::clone(&api), Arc::clone(&gate)),
            composer: PostComposer::new(Arc::clone(&api), Arc::clone(&gate), Arc::clone(&feed)),
            profiles: ProfileService::new(Arc::clone(&api), Arc::clone(&gate)),
            api,
            gate,
            feed,
        }
    }

    pub fn gate(&self) -> &Arc<SessionGate> {
        &self.gate
    }

    pub fn feed(&self) -> &FeedStore<A> {
        &self.feed
    }

    pub fn reactions(&self) -> &ReactionController<A> {
        &self.reactions
    }

    pub fn comments(&self) -> &CommentController<A> {
        &self.comments
    }

    pub fn composer(&self) -> &PostComposer<A> {
        &self.composer
    }

    pub fn profiles(&self) -> &ProfileService<A> {
        &self.profiles
    }

    /// Login/logout over `store`, which should back this client's gate.
    pub fn auth(&self, store: Arc<dyn SessionStore>) -> AuthService<A> {
        AuthService::new(Arc::clone(&self.api), store, Arc::clone(&self.gate))
    }
}

impl FeedClient<HttpFeedApi> {
    /// Client for the configured service, with sessions read from `source`.
    pub fn connect(config: &ClientConfig, source: Arc<dyn SessionSource>) -> Result<Self> {
        let api = HttpFeedApi::new(&config.base_url, config.request_timeout())?;
        tracing::debug!("Using service at {}", api.base_url());
        Ok(Self::new(Arc::new(api), source, config))
    }
}
