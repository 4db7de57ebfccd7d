//! Client-side state for the GitConnect feed.
//!
//! The core keeps a local picture of posts, reactions and comments in step
//! with the service:
//!
//! - [`SessionGate`] polls the session store and gates every mutation.
//! - [`FeedStore`] owns the post collection. Everything else updates posts
//!   through it, by id.
//! - [`ReactionController`] applies the service's authoritative counts.
//! - [`CommentController`] manages threads and their reveal windows.
//! - [`PostComposer`] prepends newly authored posts.
//!
//! [`FeedClient`] wires them together over one [`FeedApi`](gitconnect_api::FeedApi).
//!
//! Network calls are awaited without holding locks; state changes happen in
//! short critical sections once a response is in hand. Nothing is retried.

#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod comment;
pub mod composer;
pub mod config;
pub mod error;
pub mod feed;
pub mod profile;
pub mod reaction;
pub mod session;
pub mod store;

pub use auth::{AuthService, Registration};
pub use client::FeedClient;
pub use comment::CommentController;
pub use composer::PostComposer;
pub use config::{
    ClientConfig, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SESSION_POLL_MS, ReconcileOrder,
};
pub use error::{FeedError, Result, ValidationError};
pub use feed::{FeedStore, UNKNOWN_AUTHOR};
pub use profile::ProfileService;
pub use reaction::ReactionController;
pub use session::{MemorySessionSource, SessionGate, SessionSource, SessionStore};
pub use store::{LocalState, LocalStore, Preferences, StoredSession};
