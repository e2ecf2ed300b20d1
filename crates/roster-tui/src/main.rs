//! `roster-tui` — Terminal panel for managing users in a directory service.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `roster-core`. One background refresh worker owns all fetching; the
//! panel controllers only request refetches after mutations.
//!
//! Logs are written to a file (default `/tmp/roster-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod gate;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::{DataStore, Notifier, ServiceConfig, TlsMode, spawn_refresh_worker};

use crate::app::App;

/// Terminal panel for managing users in a Roster directory service.
#[derive(Parser, Debug)]
#[command(name = "roster-tui", version, about)]
struct Cli {
    /// Directory service URL (e.g., https://roster.internal)
    #[arg(short = 'u', long, env = "ROSTER_URL")]
    url: Option<String>,

    /// API key sent as `X-API-KEY`
    #[arg(short = 'k', long, env = "ROSTER_API_KEY")]
    api_key: Option<String>,

    /// Accept invalid TLS certificates (lab deployments)
    #[arg(long)]
    insecure: bool,

    /// Background refresh period in seconds; 0 disables it
    #[arg(long, default_value_t = 60)]
    refresh_interval: u64,

    /// Log file path (defaults to /tmp/roster-tui.log)
    #[arg(long, default_value = "/tmp/roster-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "roster_core={log_level},roster_api={log_level},roster_tui={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("roster-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the service to manage. Priority: CLI flags > config file.
fn resolve_service(cli: &Cli) -> Result<ServiceConfig> {
    if let Some(url) = &cli.url {
        let mut service = ServiceConfig::new(url.parse()?);
        service.api_key = cli.api_key.clone().map(SecretString::from);
        service.tls = if cli.insecure {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::Verify
        };
        service.refresh_interval_secs = cli.refresh_interval;
        return Ok(service);
    }

    let config = roster_config::load_config()?;
    Ok(roster_config::to_service_config(&config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let service = resolve_service(&cli)?;
    info!(url = %service.base_url, "starting roster-tui");

    let client = service.client()?;
    let store = Arc::new(DataStore::new());
    let cancel = CancellationToken::new();

    // The refresh worker is the only fetcher; it also performs the
    // initial load of both views.
    let (refresh, _worker) = spawn_refresh_worker(
        client.clone(),
        Arc::clone(&store),
        service.refresh_interval_secs,
        cancel.clone(),
    );

    let (notifier, notify_rx) = Notifier::channel();

    let mut app = App::new(client, store, refresh, notifier, notify_rx, cancel);
    app.run().await?;

    Ok(())
}
