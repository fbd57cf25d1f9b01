use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    preferences::{load_layout, save_layout},
    FilePreferenceStore, HttpPhotoSource, SearchOrchestrator,
};
use shared::domain::GalleryLayout;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "gallery", about = "Browse the photo API from a terminal")]
struct Args {
    /// Search terms; leave empty to list curated photos.
    query: Vec<String>,
    /// Number of pages to fetch, including the first.
    #[arg(long, default_value_t = 1)]
    pages: u32,
    #[arg(long)]
    per_page: Option<u32>,
    /// grid, carousel, list or cards. Remembered for later runs.
    #[arg(long)]
    layout: Option<GalleryLayout>,
    #[arg(long, default_value = "gallery.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(per_page) = args.per_page.filter(|n| *n > 0) {
        settings.per_page = per_page;
    }

    let preferences = FilePreferenceStore::new(&settings.preferences_path);
    let layout = match args.layout {
        Some(layout) => {
            if let Err(err) = save_layout(&preferences, layout) {
                warn!(error = %err, "could not remember layout choice");
            }
            layout
        }
        None => load_layout(&preferences),
    };

    let source = HttpPhotoSource::new(settings.source_config())
        .context("failed to set up photo API client")?;
    let orchestrator = SearchOrchestrator::with_page_size(Arc::new(source), settings.per_page);

    let query = args.query.join(" ");
    info!(query = %query, layout = layout.as_str(), pages = args.pages, "gallery: searching");
    let mut state = orchestrator.search(query).await;
    let mut fetched = 1;
    while state.error.is_none() && state.has_more && fetched < args.pages {
        state = orchestrator.load_more().await;
        fetched += 1;
    }

    print!("{}", render::render(layout, &state.items));
    if let Some(err) = &state.error {
        bail!("{}", err.user_message());
    }
    Ok(())
}
