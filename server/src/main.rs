//! Job Board Server
//!
//! Pages job postings in from the remote job source, keeps them in memory
//! and serves the filterable, infinitely scrolling card list over HTTP.

mod board;
mod config;
mod error;
mod routes;

use std::sync::Arc;

use clap::Parser;
use feed::HttpJobSource;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::board::{AppState, Board, load_page};
use crate::config::Args;
use crate::error::{BoardError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("🚀 Starting Job Board...");
    let source = HttpJobSource::new(args.endpoint.clone())?;
    info!(
        endpoint = %source.endpoint(),
        page_size = args.page_size,
        threshold = %args.threshold,
        "Configuration loaded"
    );

    let board = Board::new(args.page_size, args.threshold, args.scroll_margin);
    let state = AppState::new(board, Arc::new(source));

    // First page, as soon as the view exists
    let request = state.board.lock().await.begin_fetch();
    if let Some(feed::FetchOutcome::Failed) = load_page(&state, request).await {
        warn!("⚠️  First page failed to load, the board starts empty");
    }

    let app = routes::router(state.clone());

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .map_err(|source| BoardError::Bind {
            addr: args.bind,
            source,
        })?;
    info!("🌐 Board running at http://{}", args.bind);
    info!("   Try: curl 'http://{}/cards'", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(BoardError::Serve)?;

    state.board.lock().await.teardown();
    info!("👋 Board stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
