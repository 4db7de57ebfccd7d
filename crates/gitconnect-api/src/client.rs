//! HTTP client for the GitConnect REST service.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use gitconnect_model::{PostId, Profile, ProfileUpdate, ReactionKind};

use crate::api::FeedApi;
use crate::error::{ApiError, Result};
use crate::types::{
    AddCommentRequest, CommentEnvelope, CommentList, CreatePostRequest, ErrorBody, LoginRequest,
    LoginResponse, PostEnvelope, PostList, ProfileEnvelope, ProfileList, ReactionCounts,
    ReactionRequest, RegisterRequest, WireComment, WirePost,
};

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://gitconnect-backend.onrender.com/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("gitconnect-client/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed implementation of [`FeedApi`].
#[derive(Debug, Clone)]
pub struct HttpFeedApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFeedApi {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://gitconnect-backend.onrender.com/api`
    /// * `timeout` - Per-request timeout; no retries are attempted
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for the given path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body.
    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::send_checked(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends the request and maps non-success statuses to [`ApiError::Status`].
    async fn send_checked(request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body
                }
            });

        tracing::warn!("Service returned {}: {}", status, message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl FeedApi for HttpFeedApi {
    async fn list_posts(&self, token: Option<&str>) -> Result<Vec<WirePost>> {
        let list: PostList = Self::fetch(self.request(Method::GET, &["posts"], token)).await?;
        Ok(list.posts.unwrap_or_default())
    }

    async fn get_post(&self, token: Option<&str>, id: &PostId) -> Result<WirePost> {
        let envelope: PostEnvelope =
            Self::fetch(self.request(Method::GET, &["posts", id.as_str()], token)).await?;
        Ok(envelope.post)
    }

    async fn create_post(&self, token: &str, content: &str) -> Result<WirePost> {
        let request = self
            .request(Method::POST, &["posts"], Some(token))
            .json(&CreatePostRequest { content });
        let envelope: PostEnvelope = Self::fetch(request).await?;
        Ok(envelope.post)
    }

    async fn list_comments(
        &self,
        token: Option<&str>,
        post_id: &PostId,
    ) -> Result<Vec<WireComment>> {
        let list: CommentList = Self::fetch(self.request(
            Method::GET,
            &["posts", post_id.as_str(), "comments"],
            token,
        ))
        .await?;
        Ok(list.comments.unwrap_or_default())
    }

    async fn add_comment(
        &self,
        token: &str,
        post_id: &PostId,
        content: &str,
        username: &str,
    ) -> Result<WireComment> {
        let request = self
            .request(
                Method::POST,
                &["posts", post_id.as_str(), "comments"],
                Some(token),
            )
            .json(&AddCommentRequest { content, username });
        let envelope: CommentEnvelope = Self::fetch(request).await?;
        Ok(envelope.comment)
    }

    async fn react(
        &self,
        token: &str,
        post_id: &PostId,
        kind: ReactionKind,
    ) -> Result<ReactionCounts> {
        let request = self
            .request(
                Method::POST,
                &["posts", post_id.as_str(), kind.as_str()],
                Some(token),
            )
            .json(&ReactionRequest { reaction: kind });
        Self::fetch(request).await
    }

    async fn list_profiles(&self, token: Option<&str>) -> Result<Vec<Profile>> {
        let list: ProfileList = Self::fetch(self.request(Method::GET, &["profiles"], token)).await?;
        Ok(list.profiles.unwrap_or_default())
    }

    async fn get_profile(&self, token: Option<&str>, user_id: &str) -> Result<Profile> {
        let envelope: ProfileEnvelope =
            Self::fetch(self.request(Method::GET, &["profiles", user_id], token)).await?;
        Ok(envelope.profile)
    }

    async fn update_profile(
        &self,
        token: &str,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<()> {
        let request = self
            .request(Method::PUT, &["profiles", user_id], Some(token))
            .json(update);
        Self::send_checked(request).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .request(Method::POST, &["auth", "login"], None)
            .json(&LoginRequest { email, password });
        Self::fetch(request).await
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let request = self
            .request(Method::POST, &["auth", "register"], None)
            .json(&RegisterRequest {
                username,
                email,
                password,
            });
        Self::send_checked(request).await?;
        Ok(())
    }
}
