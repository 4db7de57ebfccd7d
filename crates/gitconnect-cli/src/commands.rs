use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::{debug, warn};

use gitconnect_api::FeedApi;
use gitconnect_core::{FeedClient, FeedError, LocalStore, Registration};
use gitconnect_model::{Comment, PostId, ProfileUpdate, ReactionKind};

use crate::cli::{Command, FeedArgs, LoginArgs, RegisterArgs, ThemeArg, UpdateProfileArgs};
use crate::render::{self, FeedRow};

/// What a command runs against.
pub struct Context<A> {
    pub client: FeedClient<A>,
    pub store: Arc<LocalStore>,
}

pub async fn run<A: FeedApi>(command: Command, ctx: &Context<A>) -> Result<()> {
    let client = &ctx.client;
    match command {
        Command::Login(args) => run_login(ctx, &args).await,
        Command::Register(args) => run_register(ctx, &args).await,
        Command::Logout => {
            client.auth(ctx.store.clone()).logout()?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            println!("{}", render::session_line(&client.gate().current_session()));
            Ok(())
        }
        Command::Feed(args) => run_feed(client, &args).await,
        Command::Post { content } => {
            let post = client.composer().submit(&content).await?;
            println!("Posted {}.", post.id);
            Ok(())
        }
        Command::Like { id } => run_react(client, PostId::new(id), ReactionKind::Like).await,
        Command::Dislike { id } => run_react(client, PostId::new(id), ReactionKind::Dislike).await,
        Command::Comment { id, content } => {
            let comment = client
                .comments()
                .add_comment(&PostId::new(id), &content)
                .await?;
            println!("{}: {}", comment.author, comment.content);
            Ok(())
        }
        Command::Comments { id, all } => run_comments(client, &PostId::new(id), all).await,
        Command::Profiles => {
            let profiles = client.profiles().list_profiles().await?;
            if profiles.is_empty() {
                println!("No profiles found.");
            } else {
                println!("{}", render::profile_table(&profiles));
            }
            Ok(())
        }
        Command::Profile { user_id } => {
            let profile = match user_id {
                Some(user_id) => client.profiles().get_profile(&user_id).await?,
                None => client.profiles().my_profile().await?,
            };
            println!("{}", render::profile_details(&profile));
            Ok(())
        }
        Command::UpdateProfile(args) => run_update_profile(client, args).await,
        Command::Theme { mode } => run_theme(&ctx.store, mode),
    }
}

async fn run_login<A: FeedApi>(ctx: &Context<A>, args: &LoginArgs) -> Result<()> {
    let session = ctx
        .client
        .auth(ctx.store.clone())
        .login(&args.email, &args.password)
        .await?;
    println!("{}", render::session_line(&session));
    Ok(())
}

async fn run_register<A: FeedApi>(ctx: &Context<A>, args: &RegisterArgs) -> Result<()> {
    let registration = Registration {
        username: args.username.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        confirm_password: args.confirm_password.clone(),
    };
    ctx.client
        .auth(ctx.store.clone())
        .register(&registration)
        .await?;
    println!("Account created. Log in with `gitconnect login {}`.", args.email);
    Ok(())
}

async fn run_feed<A: FeedApi>(client: &FeedClient<A>, args: &FeedArgs) -> Result<()> {
    let posts = client.feed().load().await?;
    if posts.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }

    let comments = client.comments();
    for post in &posts {
        // A thread that fails to load is shown empty.
        if let Err(err) = comments.load_comments(&post.id).await {
            warn!("Skipping comments for post {}: {}", post.id, err);
        }
        if args.all_comments {
            comments.expand(&post.id);
        }
    }

    let threads: Vec<(Vec<Comment>, usize)> = posts
        .iter()
        .map(|post| {
            (
                comments.visible_comments(&post.id),
                comments.hidden_count(&post.id),
            )
        })
        .collect();
    let rows: Vec<FeedRow<'_>> = posts
        .iter()
        .zip(&threads)
        .map(|(post, (visible, hidden))| FeedRow {
            post,
            visible,
            hidden: *hidden,
        })
        .collect();

    println!("{}", render::feed_table(&rows));
    Ok(())
}

async fn run_react<A: FeedApi>(
    client: &FeedClient<A>,
    id: PostId,
    kind: ReactionKind,
) -> Result<()> {
    // Without a session nothing is sent, so skip the feed fetch too.
    if !client.gate().is_authenticated() {
        return Err(FeedError::Unauthenticated.into());
    }
    client.feed().load().await?;
    let counts = client.reactions().react(&id, kind).await?;

    match client.feed().get(&id) {
        Some(post) => println!(
            "Post {}: {} likes, {} dislikes",
            post.id, post.like_count, post.dislike_count
        ),
        None => {
            debug!("Post {} is not in the feed", id);
            let show =
                |count: Option<u64>| count.map_or_else(|| "?".to_string(), |c| c.to_string());
            println!(
                "Post {}: {} likes, {} dislikes",
                id,
                show(counts.likes),
                show(counts.dislikes)
            );
        }
    }
    Ok(())
}

async fn run_comments<A: FeedApi>(client: &FeedClient<A>, id: &PostId, all: bool) -> Result<()> {
    let comments = client.comments();
    let thread = comments.load_comments(id).await?;
    if thread.is_empty() {
        println!("No comments yet.");
        return Ok(());
    }
    if all {
        comments.expand(id);
    }
    println!(
        "{}",
        render::comment_table(&comments.visible_comments(id), comments.hidden_count(id))
    );
    Ok(())
}

async fn run_update_profile<A: FeedApi>(
    client: &FeedClient<A>,
    args: UpdateProfileArgs,
) -> Result<()> {
    let update = ProfileUpdate {
        full_name: args.full_name,
        bio: args.bio,
        github: args.github,
    };
    client.profiles().update_profile(&update).await?;
    println!("Profile updated.");
    Ok(())
}

fn run_theme(store: &LocalStore, mode: Option<ThemeArg>) -> Result<()> {
    let current = store.dark_mode().context("read theme preference")?;
    let dark = match mode {
        None => current,
        Some(ThemeArg::Dark) => true,
        Some(ThemeArg::Light) => false,
        Some(ThemeArg::Toggle) => !current,
    };
    if dark != current {
        store.set_dark_mode(dark).context("save theme preference")?;
    }
    println!("Theme: {}", if dark { "dark" } else { "light" });
    Ok(())
}

/// Text to print for a failed command, or `None` when it must stay silent.
pub fn error_message(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<FeedError>() {
        Some(err) if err.is_silent() => None,
        Some(err) => Some(err.user_message()),
        None => Some(format!("{error:#}")),
    }
}

/// Prints the outcome of a command and returns the process exit code.
pub fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => match error_message(&error) {
            Some(message) => {
                eprintln!("error: {message}");
                1
            }
            None => {
                debug!("Ignored: {error}");
                0
            }
        },
    }
}
