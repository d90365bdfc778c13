mod api;
mod config;
mod db;
mod error;
mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use api::AppState;
use config::Settings;
use db::create_pool;
use service::PgApplicationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "applications_api=info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    let settings = Arc::new(Settings::load().context("Invalid configuration")?);
    tracing::info!(
        "Starting {} ({}): {}",
        settings.project_name,
        settings.startup,
        settings.description
    );
    tracing::debug!("Settings: {:?}", settings);
    if settings.secret_key().len() < 32 {
        tracing::warn!("SECRET_KEY is shorter than 32 characters");
    }

    // Create database pool
    tracing::info!(
        "Connecting to database {} on {}:{}",
        settings.db_name,
        settings.db_host,
        settings.db_port
    );
    let pool = create_pool(&settings.connection_url())
        .await
        .context("Failed to connect to database")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cors = api::cors_layer(&settings.cors_origins).context("Invalid CORS origin")?;
    let state = AppState {
        settings: settings.clone(),
        applications: Arc::new(PgApplicationService::new(pool)),
    };

    // Create router
    let app = api::create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.api_port));
    tracing::info!("Server starting on {}{}", addr, settings.api);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
