// Wefriendz - tabbed social client shell
//
// The shell composes independently built feature modules (Feed, Friends,
// Profile) into a single tabbed terminal UI and forwards coarse usage
// signals to a shared analytics sink.
//
// Architecture:
// - Composition root (this file): builds networking, API clients, typed
//   dependency containers, factories, and the feature registry
// - Shell (ratatui): renders the registry as tabs and owns the selection
// - Analytics: fire-and-forget channel into a JSONL sink task
// - Logging: tracing captured into an in-TUI buffer, optional file output

mod analytics;
mod cli;
mod config;
mod feature;
mod features;
mod logging;
mod net;
mod shell;
mod startup;

use analytics::sink::{generate_session_id, AnalyticsSink};
use analytics::{Analytics, AnalyticsEvent, ChannelAnalytics};
use anyhow::{Context, Result};
use config::{Config, LogRotation};
use feature::{FeatureFactory, FeatureRegistry};
use features::feed::{FeedApi, FeedApiClient, FeedDependencies, FeedFeatureFactory};
use features::friends::{
    FriendsApi, FriendsApiClient, FriendsDependencies, FriendsFeatureFactory,
};
use features::profile::{
    ProfileApi, ProfileApiClient, ProfileDependencies, ProfileFeatureFactory,
};
use logging::{LogBuffer, ShellLogLayer};
use net::Networking;
use shell::app::Shell;
use shell::theme::ThemeKind;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env();

    // Create log buffer for TUI mode
    let log_buffer = LogBuffer::new();

    // Initialize tracing with conditional output
    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: output logs to stdout
    // The guard must be kept alive so file logs flush on exit
    let _file_guard = init_tracing(&config, &log_buffer);

    // Generate session ID for this run
    let session_id = generate_session_id();
    tracing::debug!("Session ID: {}", session_id);

    // Analytics: bounded channel into a background JSONL sink task.
    // track() uses try_send and can never stall the event loop.
    let (event_tx, event_rx) = mpsc::channel(256);
    let analytics: Arc<dyn Analytics> = Arc::new(ChannelAnalytics::new(event_tx));
    let sink = AnalyticsSink::new(config.log_dir.clone(), session_id.clone(), event_rx)
        .context("Failed to create analytics sink")?;
    let sink_handle = tokio::spawn(sink.run());

    // Shared networking collaborator behind every feature API client
    let networking = Networking::new(&config.api_url).context("Failed to create networking")?;
    tracing::debug!("Networking ready for {}", networking.base_url());

    // Build API clients over the shared networking layer
    let feed_api: Arc<dyn FeedApi> = Arc::new(FeedApiClient::new(networking.clone()));
    let friends_api: Arc<dyn FriendsApi> = Arc::new(FriendsApiClient::new(networking.clone()));
    let profile_api: Arc<dyn ProfileApi> = Arc::new(ProfileApiClient::new(networking));

    // Wrap APIs and analytics into feature-specific dependency containers.
    // Typed all the way through: no downcasts at the wiring boundary.
    let feed_dependencies = FeedDependencies::new(feed_api, analytics.clone());
    let friends_dependencies = FriendsDependencies::new(friends_api, analytics.clone());
    let profile_dependencies = ProfileDependencies::new(profile_api, analytics.clone());

    // Register all features that should appear in the shell, in tab order.
    // Each factory is invoked exactly once during assembly; a malformed
    // feature set (duplicate id) is fatal here, before any UI comes up.
    let factories: Vec<Box<dyn FeatureFactory>> = vec![
        Box::new(FeedFeatureFactory::new(feed_dependencies)),
        Box::new(FriendsFeatureFactory::new(friends_dependencies)),
        Box::new(ProfileFeatureFactory::new(profile_dependencies)),
    ];
    let registry = FeatureRegistry::assemble(factories).context("Failed to compose features")?;

    // Print startup banner before the TUI takes over the screen
    startup::print_startup(&config, &registry, &session_id);
    startup::log_startup(&config, &registry, &session_id);

    if config.enable_tui {
        tracing::info!("Starting shell UI");
        let shell = Shell::new(
            registry,
            analytics.clone(),
            ThemeKind::from_name(&config.theme),
            log_buffer,
        );
        if let Err(e) = shell::run_shell(shell).await {
            tracing::error!("Shell error: {:?}", e);
        }
    } else {
        // Headless smoke mode: compose everything, report the launch, wait
        tracing::info!("TUI disabled, running in headless mode");
        analytics.track(AnalyticsEvent::AppLaunched);
        tokio::signal::ctrl_c().await?;
        // The features hold analytics handles through their dependencies;
        // release them so the sink channel can close below
        drop(registry);
    }

    tracing::info!("Shutting down...");

    // Drop the last analytics handle so the sink channel closes and the
    // task drains remaining events before exiting
    drop(analytics);
    let _ = sink_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber
///
/// Layer selection follows the run mode: the TUI captures logs into the
/// in-memory buffer, headless mode writes to stdout, and file logging (JSON,
/// rotating) can be layered on top of either.
///
/// Precedence for the filter: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("wefriendz={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let file_writer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                // Writes happen in a background thread; keep the guard alive
                Some(tracing_appender::non_blocking(file_appender))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    match (config.enable_tui, file_writer) {
        (true, Some((non_blocking, guard))) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(ShellLogLayer::new(log_buffer.clone()))
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        (true, None) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(ShellLogLayer::new(log_buffer.clone()))
                .init();
            None
        }
        (false, Some((non_blocking, guard))) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        (false, None) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}
