//! Trivia Server
//!
//! REST backend for the trivia game: paginated question listings, search,
//! category filtering, question management and random quiz questions.
//!
//! Uses SQLite (embedded) by default, or a purely in-memory store.

mod config;
mod extractors;
mod handlers;
mod seed;
mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use trivia_core::QueryEngine;

use crate::config::{ServerConfig, StorageKind};
use crate::seed::{SeedData, SeedOutcome, SeedTarget};
use crate::storage::{Database, MemoryStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trivia_server=info,trivia_core=info,tower_http=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Trivia Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    info!("Loading configuration...");
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, storage={:?}",
        config.bind_address, config.storage
    );

    let seed = match &config.seed_path {
        Some(path) => SeedData::from_path(path)?,
        None => SeedData::builtin()?,
    };

    let engine = match config.storage {
        StorageKind::Sqlite => {
            let path = config.database_path();
            let db = Arc::new(
                Database::new(&path.to_string_lossy(), config.store_timeout())
                    .await
                    .context("Failed to initialize database")?,
            );
            info!("SQLite database initialized at: {}", path.display());
            open_engine(db, &seed).await?
        }
        StorageKind::Memory => {
            warn!("Using in-memory store, nothing will be persisted");
            open_engine(Arc::new(MemoryStore::new()), &seed).await?
        }
    };

    let state = AppState {
        engine: Arc::new(engine),
    };

    info!("Building HTTP router...");
    let app = build_router(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn open_engine<S: SeedTarget + 'static>(
    store: Arc<S>,
    seed: &SeedData,
) -> Result<QueryEngine> {
    match seed::apply(store.as_ref(), seed)
        .await
        .context("Failed to seed store")?
    {
        SeedOutcome::Applied {
            categories,
            questions,
        } => info!(
            "Seeded {} categories and {} questions",
            categories, questions
        ),
        SeedOutcome::Skipped => info!("Existing data found, seed not applied"),
    }
    Ok(QueryEngine::new(store))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/categories", get(handlers::categories::list))
        .route("/categories/:id", get(handlers::categories::get))
        .route(
            "/categories/:id/questions",
            get(handlers::categories::questions),
        )
        .route(
            "/questions",
            get(handlers::questions::list).post(handlers::questions::create_or_search),
        )
        .route("/questions/search", post(handlers::questions::search))
        .route("/questions/:id", delete(handlers::questions::delete))
        .route("/quizzes", post(handlers::quizzes::next_question))
        .fallback(handlers::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
