use std::net::SocketAddr;

use clickearn_service::auth::provider::IdentityProvider;
use clickearn_service::config::Config;
use clickearn_service::AppState;
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clickearn_service=debug,tower_http=debug".into()),
        )
        .init();

    // Load config
    let config = Config::from_env().expect("Failed to load configuration");

    // Connect to database
    let db = clickearn_service::db::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Run migrations
    Migrator::up(&db, None).await?;
    tracing::info!("Migrations applied");

    // Build app state
    let provider = IdentityProvider::new(&config);
    let state = AppState {
        db,
        config: config.clone(),
        provider,
    };

    // Build router
    let app = clickearn_service::routes::create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .expect("Invalid server address");

    tracing::info!("Starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
