//! Integration tests for the feed store and the post composer.

mod common;

use common::{FakeApi, Harness, octocat, wire_post};
use gitconnect_core::{FeedError, UNKNOWN_AUTHOR, ValidationError};
use gitconnect_model::{PostId, PostPatch, ReactionState, Session};
use proptest::prelude::*;

fn ids(harness: &Harness) -> Vec<String> {
    harness
        .client
        .feed()
        .posts()
        .iter()
        .map(|p| p.id.to_string())
        .collect()
}

#[tokio::test]
async fn test_load_replaces_collection() {
    let mut anonymous = wire_post(3, 15, 0, 0);
    anonymous.user = None;
    let harness = Harness::new(
        FakeApi::with_posts(vec![wire_post(1, 10, 2, 0), wire_post(2, 20, 0, 1), anonymous]),
        Session::anonymous(),
    );

    let posts = harness.client.feed().load().await.unwrap();

    assert_eq!(posts.len(), 3);
    assert_eq!(ids(&harness), ["2", "3", "1"]);
    assert_eq!(posts[0].author_name, "author2");
    assert_eq!(posts[1].author_name, UNKNOWN_AUTHOR);
    assert!(posts.iter().all(|p| p.reaction_state == ReactionState::None));
}

#[tokio::test]
async fn test_failed_load_empties_collection() {
    let harness = Harness::new(FakeApi::with_posts(vec![wire_post(1, 10, 0, 0)]), octocat());
    harness.client.feed().load().await.unwrap();
    harness.api.fail_all(true);

    let err = harness.client.feed().load().await.unwrap_err();

    assert!(matches!(err, FeedError::Api(_)));
    assert!(harness.client.feed().is_empty());
    assert_eq!(harness.api.calls("list_posts"), 2);
}

#[tokio::test]
async fn test_new_post_goes_to_head() {
    let harness = Harness::new(FakeApi::with_posts(vec![wire_post(2, 10, 4, 1)]), octocat());
    harness.client.feed().load().await.unwrap();

    let post = harness.client.composer().submit("hello").await.unwrap();

    assert_eq!(post.content, "hello");
    assert_eq!(post.author_name, "octocat");
    assert_eq!((post.like_count, post.dislike_count), (0, 0));
    assert_eq!(post.reaction_state, ReactionState::None);

    let posts = harness.client.feed().posts();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0], post);
    assert_eq!(posts[1].id, PostId::from(2));
}

#[tokio::test]
async fn test_blank_post_is_ignored() {
    let harness = Harness::new(FakeApi::default(), octocat());

    let err = harness.client.composer().submit(" \n ").await.unwrap_err();

    assert!(matches!(
        err,
        FeedError::ValidationFailed(ValidationError::EmptyContent)
    ));
    assert!(err.is_silent());
    assert_eq!(harness.api.calls("create_post"), 0);
    assert!(harness.client.feed().is_empty());
}

#[tokio::test]
async fn test_post_content_is_sent_verbatim() {
    let harness = Harness::new(FakeApi::default(), octocat());
    let code = "    fn main() {}\n";

    let post = harness.client.composer().submit(code).await.unwrap();

    assert_eq!(harness.api.sent(), [code]);
    assert_eq!(post.content, code);
    assert_eq!(harness.client.feed().posts()[0].content, code);
}

#[tokio::test]
async fn test_unauthenticated_post_is_ignored() {
    let harness = Harness::new(FakeApi::default(), Session::anonymous());

    let err = harness.client.composer().submit("hello").await.unwrap_err();

    assert!(matches!(err, FeedError::Unauthenticated));
    assert_eq!(harness.api.total_calls(), 0);
}

#[tokio::test]
async fn test_draft_cleared_only_on_success() {
    let harness = Harness::new(FakeApi::default(), octocat());
    let composer = harness.client.composer();
    composer.set_draft("draft text");

    harness.api.fail_all(true);
    assert!(composer.submit_draft().await.is_err());
    assert_eq!(composer.draft(), "draft text");
    assert!(harness.client.feed().is_empty());

    harness.api.fail_all(false);
    let post = composer.submit_draft().await.unwrap();
    assert_eq!(post.content, "draft text");
    assert_eq!(composer.draft(), "");
}

#[tokio::test]
async fn test_refresh_post_merges_counts() {
    let harness = Harness::new(FakeApi::with_posts(vec![wire_post(1, 10, 0, 0)]), octocat());
    harness.client.feed().load().await.unwrap();
    harness.client.feed().apply_post_update(
        &PostId::from(1),
        &PostPatch::default().with_reaction_state(ReactionState::Liked),
    );

    let refreshed = harness
        .client
        .feed()
        .refresh_post(&PostId::from(1))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(refreshed.like_count, 0);
    assert_eq!(refreshed.reaction_state, ReactionState::Liked);
    assert_eq!(harness.api.calls("get_post"), 1);
}

#[tokio::test]
async fn test_update_for_absent_post_is_noop() {
    let harness = Harness::new(FakeApi::with_posts(vec![wire_post(1, 10, 0, 0)]), octocat());
    harness.client.feed().load().await.unwrap();
    let before = harness.client.feed().posts();

    let applied = harness
        .client
        .feed()
        .apply_post_update(&PostId::from(99), &PostPatch::counts(Some(5), Some(5)));

    assert!(!applied);
    assert_eq!(harness.client.feed().posts(), before);
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_updates_preserve_order(
        n in 1u64..12,
        updates in prop::collection::vec(
            (0u64..16, prop::option::of(0u64..1000), prop::option::of(0u64..1000)),
            0..24,
        ),
    ) {
        let posts = (1..=n).map(|i| wire_post(i, i as i64, 0, 0)).collect();
        let harness = Harness::new(FakeApi::with_posts(posts), octocat());
        runtime().block_on(harness.client.feed().load()).unwrap();
        let order = ids(&harness);

        for (target, likes, dislikes) in updates {
            let id = PostId::from(target);
            let before = harness.client.feed().get(&id);
            let applied = harness
                .client
                .feed()
                .apply_post_update(&id, &PostPatch::counts(likes, dislikes));
            prop_assert_eq!(applied, before.is_some());

            if let (Some(before), Some(after)) = (before, harness.client.feed().get(&id)) {
                prop_assert_eq!(after.like_count, likes.unwrap_or(before.like_count));
                prop_assert_eq!(after.dislike_count, dislikes.unwrap_or(before.dislike_count));
            }
        }

        prop_assert_eq!(ids(&harness), order);
        prop_assert_eq!(harness.client.feed().len(), n as usize);
    }
}
