pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{Database, MemoryStore, Store};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Build the API router with all routes.
pub fn build_router(state: AppState) -> Router {
    let children = Router::new()
        .route(
            "/api/children",
            get(routes::children::list).post(routes::children::create),
        )
        .route(
            "/api/children/:child_id",
            get(routes::children::get)
                .put(routes::children::update)
                .delete(routes::children::delete),
        )
        .route(
            "/api/children/:child_id/settings",
            get(routes::children::get_settings).put(routes::children::update_settings),
        )
        .route(
            "/api/children/:child_id/progress",
            post(routes::children::progress),
        )
        .route(
            "/api/children/:child_id/stickers",
            get(routes::children::stickers),
        )
        .route(
            "/api/children/:child_id/rounds",
            post(routes::children::new_round),
        );

    let game = Router::new()
        .route("/api/game/graphemes", get(routes::game::graphemes))
        .route(
            "/api/game/graphemes/random",
            get(routes::game::random_graphemes),
        )
        .route("/api/game/evaluate", post(routes::game::evaluate_answer))
        .route("/api/game/evaluate/trace", post(routes::game::evaluate_trace))
        .route("/api/audio/:grapheme", get(routes::game::audio));

    Router::new()
        .route("/health", get(health_check))
        .merge(children)
        .merge(game)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(url, config.max_connections).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;
            Arc::new(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app = build_router(AppState::new(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
