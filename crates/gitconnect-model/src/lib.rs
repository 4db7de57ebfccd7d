//! Domain types shared by the GitConnect feed client crates.
//!
//! Everything here is plain data: the session snapshot read by the session
//! gate, the posts owned by the feed store, comment threads and their reveal
//! windows, and user profiles. No type in this crate performs I/O.
//!
//! # Overview
//!
//! - [`Session`] - who the client currently acts as (token, user id, name)
//! - [`Post`] / [`PostId`] / [`PostPatch`] - feed entries and partial updates
//! - [`ReactionKind`] / [`ReactionState`] - like/dislike requests and the
//!   current session's known reaction to a post
//! - [`Comment`] / [`RevealWindow`] - append-only comment threads and how much
//!   of each thread is shown
//! - [`Profile`] / [`ProfileUpdate`] - user profiles

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comment;
pub mod post;
pub mod profile;
pub mod session;

pub use comment::{Comment, RevealWindow};
pub use post::{Post, PostId, PostPatch, ReactionKind, ReactionState};
pub use profile::{Profile, ProfileUpdate};
pub use session::{ANONYMOUS_NAME, Session};
