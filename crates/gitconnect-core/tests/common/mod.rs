//! Scripted in-memory service shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use gitconnect_api::{
    ApiError, FeedApi, LoginResponse, LoginUser, ReactionCounts, Result, WireComment, WirePost,
    WireUser,
};
use gitconnect_core::{ClientConfig, FeedClient, MemorySessionSource, ReconcileOrder};
use gitconnect_model::{PostId, Profile, ProfileUpdate, ReactionKind, Session};
use tokio::sync::oneshot;

pub const PASSWORD: &str = "correct horse";

enum ReactionReply {
    Now(Result<ReactionCounts>),
    Held(oneshot::Receiver<Result<ReactionCounts>>),
}

/// A fake service that records every call.
///
/// Reaction replies are consumed in request order. A held reply resolves only
/// when the test sends on the matching channel, which lets a test decide the
/// order in which responses arrive.
#[derive(Default)]
pub struct FakeApi {
    posts: Mutex<Vec<WirePost>>,
    comments: Mutex<HashMap<PostId, Vec<WireComment>>>,
    reactions: Mutex<VecDeque<ReactionReply>>,
    profiles: Mutex<Vec<Profile>>,
    updates: Mutex<Vec<(String, ProfileUpdate)>>,
    calls: Mutex<Vec<&'static str>>,
    sent: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl FakeApi {
    pub fn with_posts(posts: Vec<WirePost>) -> Self {
        let api = Self::default();
        *api.posts.lock().unwrap() = posts;
        api
    }

    pub fn set_comments(&self, post_id: &str, comments: Vec<WireComment>) {
        self.comments
            .lock()
            .unwrap()
            .insert(PostId::from(post_id), comments);
    }

    pub fn set_profiles(&self, profiles: Vec<Profile>) {
        *self.profiles.lock().unwrap() = profiles;
    }

    /// Makes every following call fail with a 500.
    pub fn fail_all(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Queues an immediate reaction reply.
    pub fn reply(&self, likes: Option<u64>, dislikes: Option<u64>) {
        self.reactions
            .lock()
            .unwrap()
            .push_back(ReactionReply::Now(Ok(ReactionCounts { likes, dislikes })));
    }

    /// Queues a reaction reply that resolves when the sender is used.
    pub fn hold(&self) -> oneshot::Sender<Result<ReactionCounts>> {
        let (tx, rx) = oneshot::channel();
        self.reactions
            .lock()
            .unwrap()
            .push_back(ReactionReply::Held(rx));
        tx
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Post and comment bodies exactly as they reached the service.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, ProfileUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(name);
        if self.fail.load(Ordering::SeqCst) {
            Err(server_error())
        } else {
            Ok(())
        }
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "Internal server error".to_string(),
    }
}

impl FeedApi for FakeApi {
    async fn list_posts(&self, _token: Option<&str>) -> Result<Vec<WirePost>> {
        self.record("list_posts")?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn get_post(&self, _token: Option<&str>, id: &PostId) -> Result<WirePost> {
        self.record("get_post")?;
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| &post.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Post not found".to_string(),
            })
    }

    async fn create_post(&self, _token: &str, content: &str) -> Result<WirePost> {
        self.record("create_post")?;
        self.sent.lock().unwrap().push(content.to_string());
        let mut posts = self.posts.lock().unwrap();
        let post = WirePost {
            id: PostId::from(100 + posts.len() as u64),
            content: content.to_string(),
            created_at: Some(at(1_000_000)),
            likes: None,
            dislikes: None,
            user: None,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn list_comments(
        &self,
        _token: Option<&str>,
        post_id: &PostId,
    ) -> Result<Vec<WireComment>> {
        self.record("list_comments")?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_comment(
        &self,
        _token: &str,
        _post_id: &PostId,
        content: &str,
        _username: &str,
    ) -> Result<WireComment> {
        self.record("add_comment")?;
        self.sent.lock().unwrap().push(content.to_string());
        // The service's idea of the author must never be shown.
        Ok(wire_comment(Some("server-side name"), content))
    }

    async fn react(
        &self,
        _token: &str,
        _post_id: &PostId,
        kind: ReactionKind,
    ) -> Result<ReactionCounts> {
        self.record(match kind {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        })?;
        let reply = self.reactions.lock().unwrap().pop_front();
        match reply {
            Some(ReactionReply::Now(result)) => result,
            Some(ReactionReply::Held(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("reply dropped".to_string()))),
            None => Err(ApiError::Network("no reply scripted".to_string())),
        }
    }

    async fn list_profiles(&self, _token: Option<&str>) -> Result<Vec<Profile>> {
        self.record("list_profiles")?;
        Ok(self.profiles.lock().unwrap().clone())
    }

    async fn get_profile(&self, _token: Option<&str>, user_id: &str) -> Result<Profile> {
        self.record("get_profile")?;
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|profile| profile.user_id.to_string() == user_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: String::new(),
            })
    }

    async fn update_profile(
        &self,
        _token: &str,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<()> {
        self.record("update_profile")?;
        self.updates
            .lock()
            .unwrap()
            .push((user_id.to_string(), update.clone()));
        Ok(())
    }

    async fn login(&self, _email: &str, password: &str) -> Result<LoginResponse> {
        self.record("login")?;
        if password != PASSWORD {
            return Err(ApiError::Status {
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }
        Ok(LoginResponse {
            token: "jwt-token".to_string(),
            user: LoginUser {
                id: "7".to_string(),
                username: Some("octocat".to_string()),
            },
        })
    }

    async fn register(&self, _username: &str, _email: &str, _password: &str) -> Result<()> {
        self.record("register")
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

pub fn wire_post(id: u64, secs: i64, likes: u64, dislikes: u64) -> WirePost {
    WirePost {
        id: PostId::from(id),
        content: format!("post {id}"),
        created_at: Some(at(secs)),
        likes: Some(likes),
        dislikes: Some(dislikes),
        user: Some(WireUser {
            username: Some(format!("author{id}")),
        }),
    }
}

pub fn wire_comment(username: Option<&str>, content: &str) -> WireComment {
    WireComment {
        content: content.to_string(),
        username: username.map(str::to_string),
        user: None,
    }
}

pub fn octocat() -> Session {
    Session::authenticated("jwt-token", "7", "octocat")
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub source: Arc<MemorySessionSource>,
    pub client: Arc<FeedClient<FakeApi>>,
}

impl Harness {
    pub fn new(api: FakeApi, session: Session) -> Self {
        Self::with_order(api, session, ReconcileOrder::ArrivalOrder)
    }

    pub fn with_order(api: FakeApi, session: Session, order: ReconcileOrder) -> Self {
        let api = Arc::new(api);
        let source = Arc::new(MemorySessionSource::new(session));
        let config = ClientConfig {
            reconcile_order: order,
            ..ClientConfig::default()
        };
        let client = Arc::new(FeedClient::new(Arc::clone(&api), source.clone(), &config));
        Self {
            api,
            source,
            client,
        }
    }

    /// Lets spawned tasks run until the fake has seen `n` calls named `name`.
    pub async fn wait_for_calls(&self, name: &str, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.api.calls(name) < n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
