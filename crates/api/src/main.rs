use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kanri_api::config::ServerConfig;
use kanri_api::router::build_app_router;
use kanri_api::state::AppState;
use kanri_db::detach::NoopDetach;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kanri_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = kanri_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    kanri_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    kanri_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Router + state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        detach_hook: Arc::new(NoopDetach),
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
