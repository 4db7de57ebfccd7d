//! CLI argument definitions for the GitConnect client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gitconnect",
    version,
    about = "GitConnect - read and interact with the developer feed",
    long_about = "Read the GitConnect feed, post, react and comment.\n\n\
                  Login state is kept in the local state file and shared with \
                  every other client using the same file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Service root URL (overrides the config file).
    #[arg(long = "api-url", env = "GITCONNECT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Local state file holding the session and preferences.
    #[arg(
        long = "state-file",
        env = "GITCONNECT_STATE_FILE",
        value_name = "PATH",
        global = true
    )]
    pub state_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and store the session locally.
    Login(LoginArgs),

    /// Create an account.
    Register(RegisterArgs),

    /// Forget the stored session.
    Logout,

    /// Show the stored session.
    Whoami,

    /// Show the feed, newest first.
    Feed(FeedArgs),

    /// Publish a post.
    Post {
        /// Post body.
        content: String,
    },

    /// Like a post.
    Like {
        /// Post id.
        id: String,
    },

    /// Dislike a post.
    Dislike {
        /// Post id.
        id: String,
    },

    /// Comment on a post.
    Comment {
        /// Post id.
        id: String,
        /// Comment body.
        content: String,
    },

    /// Show the comments on a post.
    Comments {
        /// Post id.
        id: String,
        /// Show the whole thread instead of the most recent comment.
        #[arg(long)]
        all: bool,
    },

    /// List all profiles.
    Profiles,

    /// Show a profile (your own when no user id is given).
    Profile {
        /// User id.
        user_id: Option<String>,
    },

    /// Update your profile.
    UpdateProfile(UpdateProfileArgs),

    /// Show or change the color theme preference.
    Theme {
        /// New theme. Omit to print the current one.
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },
}

#[derive(Args)]
pub struct LoginArgs {
    /// Account email.
    pub email: String,

    /// Account password.
    #[arg(long, env = "GITCONNECT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Username shown on posts and comments.
    pub username: String,

    /// Account email.
    pub email: String,

    /// Account password.
    #[arg(long, env = "GITCONNECT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password confirmation. Must match `--password`.
    #[arg(long = "confirm-password")]
    pub confirm_password: String,
}

#[derive(Args)]
pub struct FeedArgs {
    /// Expand every comment thread.
    #[arg(long = "all-comments")]
    pub all_comments: bool,
}

#[derive(Args)]
pub struct UpdateProfileArgs {
    /// Full name (required).
    #[arg(long = "full-name")]
    pub full_name: String,

    /// Short bio.
    #[arg(long, default_value = "")]
    pub bio: String,

    /// GitHub profile URL.
    #[arg(long, default_value = "")]
    pub github: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
    Toggle,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
