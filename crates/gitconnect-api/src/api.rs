//! The service seam consumed by the client core.

use std::future::Future;

use gitconnect_model::{PostId, Profile, ProfileUpdate, ReactionKind};

use crate::error::Result;
use crate::types::{LoginResponse, ReactionCounts, WireComment, WirePost};

/// Operations of the GitConnect REST contract.
///
/// `token` parameters are sent as a bearer `Authorization` header. Calls that
/// the service allows anonymously take an `Option`.
///
/// [`HttpFeedApi`](crate::HttpFeedApi) is the production implementation;
/// tests substitute scripted fakes.
pub trait FeedApi: Send + Sync {
    /// `GET /posts`
    fn list_posts(&self, token: Option<&str>) -> impl Future<Output = Result<Vec<WirePost>>> + Send;

    /// `GET /posts/{id}`
    fn get_post(
        &self,
        token: Option<&str>,
        id: &PostId,
    ) -> impl Future<Output = Result<WirePost>> + Send;

    /// `POST /posts`
    fn create_post(
        &self,
        token: &str,
        content: &str,
    ) -> impl Future<Output = Result<WirePost>> + Send;

    /// `GET /posts/{id}/comments`
    fn list_comments(
        &self,
        token: Option<&str>,
        post_id: &PostId,
    ) -> impl Future<Output = Result<Vec<WireComment>>> + Send;

    /// `POST /posts/{id}/comments`
    fn add_comment(
        &self,
        token: &str,
        post_id: &PostId,
        content: &str,
        username: &str,
    ) -> impl Future<Output = Result<WireComment>> + Send;

    /// `POST /posts/{id}/like` or `POST /posts/{id}/dislike`
    fn react(
        &self,
        token: &str,
        post_id: &PostId,
        kind: ReactionKind,
    ) -> impl Future<Output = Result<ReactionCounts>> + Send;

    /// `GET /profiles`
    fn list_profiles(
        &self,
        token: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Profile>>> + Send;

    /// `GET /profiles/{userId}`
    fn get_profile(
        &self,
        token: Option<&str>,
        user_id: &str,
    ) -> impl Future<Output = Result<Profile>> + Send;

    /// `PUT /profiles/{userId}`
    fn update_profile(
        &self,
        token: &str,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `POST /auth/login`
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse>> + Send;

    /// `POST /auth/register`
    fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}
