//! GitConnect command-line client.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{ColorChoice, Parser};
use gitconnect_api::HttpFeedApi;
use gitconnect_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use gitconnect_cli::commands::{Context, report, run};
use gitconnect_cli::logging::{LogConfig, LogFormat, init_logging};
use gitconnect_core::{ClientConfig, FeedClient, LocalStore};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start async runtime: {error}");
            std::process::exit(1);
        }
    };

    let exit_code = report(runtime.block_on(execute(cli)));
    std::process::exit(exit_code);
}

async fn execute(cli: Cli) -> Result<()> {
    let ctx = build_context(&cli)?;
    run(cli.command, &ctx).await
}

fn build_context(cli: &Cli) -> Result<Context<HttpFeedApi>> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)
            .with_context(|| format!("load config from {}", path.display()))?,
        None => ClientConfig::load(),
    };
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url.clone());
    }

    let store = Arc::new(match &cli.state_file {
        Some(path) => LocalStore::at(path),
        None => LocalStore::open_default(),
    });
    let client = FeedClient::connect(&config, store.clone())?;
    Ok(Context { client, store })
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
