mod action;
mod app;
mod app_state;
mod component;
mod components;
mod controller;
mod signal;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;

use podcast_catalog::config::Config;
use podcast_catalog::{Catalog, SortKey, ViewState};

/// Browse a podcast catalog in the terminal.
#[derive(Debug, Parser)]
#[command(name = "podcasts", version)]
struct Cli {
    /// JSON catalog file (defaults to the configured path, then the bundled sample)
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Start filtered to this genre id
    #[arg(long, value_name = "ID")]
    genre: Option<String>,

    /// Initial sort: none, title or updated
    #[arg(long, value_name = "KEY")]
    sort: Option<String>,

    /// Initial title search
    #[arg(long, value_name = "TERM")]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = podcast_catalog::platform::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    let log_path = data_dir.join("podcasts.log");

    // ── Load config ──────────────────────────────────────────────────────────
    let (config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    // Allow RUST_LOG override; otherwise use the configured filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("podcasts log: {}", log_path.display());
    tracing::info!("podcast browser starting…");
    if let Some(e) = config_error {
        tracing::warn!("config unreadable, using defaults: {:#}", e);
    }

    // ── Load catalog ─────────────────────────────────────────────────────────
    let mut status = None;
    let catalog = match &cli.catalog {
        // An explicit path must load.
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None if config.catalog.path.exists() => Catalog::load(&config.catalog.path)
            .with_context(|| format!("loading catalog {}", config.catalog.path.display()))?,
        None => {
            tracing::warn!(
                "no catalog at {}, using the bundled sample",
                config.catalog.path.display()
            );
            status = Some("showing bundled sample catalog".to_string());
            Catalog::bundled()
        }
    };

    // ── Initial view: CLI flags over config ─────────────────────────────────
    let genre = cli
        .genre
        .as_deref()
        .unwrap_or(config.browse.default_genre.as_str());
    let sort_key = match &cli.sort {
        Some(label) => SortKey::from_label(label),
        None => config.browse.sort_key(),
    };
    let view = ViewState {
        active_genre: None,
        search_term: cli.search.clone().unwrap_or_default(),
        sort_key,
    };
    tracing::info!(
        "initial view: genre={:?} sort={} search={:?}",
        genre,
        view.sort_key.label(),
        view.search_term
    );

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(Arc::new(catalog), view, genre, status);
    app.run().await
}
