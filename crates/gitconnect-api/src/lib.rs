//! REST contract and HTTP client for the GitConnect service.
//!
//! The client core never talks to `reqwest` directly: it is written against
//! the [`FeedApi`] trait, and [`HttpFeedApi`] is the implementation used in
//! production.
//!
//! # Example
//!
//! ```no_run
//! use gitconnect_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, FeedApi, HttpFeedApi};
//!
//! async fn print_feed() -> gitconnect_api::Result<()> {
//!     let api = HttpFeedApi::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)?;
//!     for post in api.list_posts(None).await? {
//!         println!("{}: {}", post.id, post.content);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::FeedApi;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpFeedApi};
pub use error::{ApiError, Result};
pub use types::{LoginResponse, LoginUser, ReactionCounts, WireComment, WirePost, WireUser};
