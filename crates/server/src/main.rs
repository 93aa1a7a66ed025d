use server::config;
use server::db;
use server::registry;
use server::routes;
use server::sync;

use std::time::Duration;

use axum::{routing::{get, post}, Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // Connect to Postgres
    tracing::info!("Connecting to database...");
    let pool = db::pool::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run schema migrations
    tracing::info!("Running migrations...");
    db::pool::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // One registry + service for the whole process, shared via Extension
    let registry = registry::SubscriptionRegistry::with_send_timeout(Duration::from_secs(
        config.push_timeout_secs,
    ));
    let sync = sync::GameSync::new(pool, registry);

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Games
        .route(
            "/game",
            post(routes::games::create_game).patch(routes::games::submit_state),
        )
        .route("/game/{id}", get(routes::games::get_history))
        // Realtime watch socket
        .route("/socket/{id}", get(routes::socket::ws_handler))
        // Shared state
        .layer(Extension(sync))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
