use anyhow::Result;
use fitness_coach::api::routes::create_routes;
use fitness_coach::config::{run_migrations, AppConfig, DatabaseConfig};
use fitness_coach::services::{narrative_generator_from_config, CoachingService, StorageService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before tracing starts, so the outcome is logged below
    let dotenv = dotenvy::dotenv();
    let config = AppConfig::from_env()?;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warn!("No .env file found or failed to load: {}", e),
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;
    info!("Database ready at {}", db_config.database_url);

    let narrator = narrative_generator_from_config(&config.narrative)?;
    let coaching_service = CoachingService::new(StorageService::new(pool.clone()), narrator);
    let app = create_routes(coaching_service);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        environment = %config.environment,
        "Fitness coach server starting on http://{}",
        config.server_address()
    );
    if config.is_development() {
        info!("Health check available at http://{}/health", config.server_address());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
