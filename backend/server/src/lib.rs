//! Catalog API server.
//!
//! Serves a paginated, searchable list of items out of a single JSON file.
//!
//!
//!
//! # Endpoints
//! - `GET /api/items?page=&limit=&q=` returns `{ total, page, limit, data }`
//! - `GET /api/items/{id}` returns one item or `404 { error }`
//! - `POST /api/items` appends an item, id assigned from the current timestamp, `201`
//! - `GET /api/stats` returns `{ total, averagePrice }`, recomputed per request
//! - Anything else is `404 { error: "Route Not Found" }`
//!
//!
//!
//! # Errors
//!
//! Every handler returns `Result<_, AppError>`. The one `IntoResponse` impl on
//! [`error::AppError`] is the only place errors become responses, always as
//! `{ error: message }` with the error's status code. Server errors are also
//! logged at `error` level.
//!
//!
//!
//! # Notes
//!
//! ## No caching
//! The file is re-read on every request. The catalog is small, and a cache would
//! need invalidation on every append for no measurable gain.
//!
//! ## Writes
//! Appends are read-modify-write on the whole file with no lock. Two POSTs racing
//! each other can drop one item. Accepted for a single-writer catalog.
//!
//!
//!
//! # Setup
//!
//! Run with defaults (port 3001, `data/items.json`).
//! ```sh
//! RUST_LOG=info cargo run -p catalog-backend
//! ```
//!
//! Seed sample data first.
//! ```sh
//! cargo run -p tester -- 50 data/items.json
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod search;
pub mod state;
pub mod utils;

use config::Config;
use error::StartupError;
use routes::{
    create_item_handler, fallback_handler, get_item_handler, list_items_handler, stats_handler,
};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.frontend_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/api/items",
            get(list_items_handler)
                .post(create_item_handler)
                .fallback(fallback_handler),
        )
        .route(
            "/api/items/{id}",
            get(get_item_handler).fallback(fallback_handler),
        )
        .route("/api/stats", get(stats_handler).fallback(fallback_handler))
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> Result<(), StartupError> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config);
    info!("Serving items from {}", state.store.path().display());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
