use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,domain=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting keeper-league draft server");
    tracing::info!("Server will listen on: {}", config.server_address());

    // Create application state
    let state = if config.database.url == "memory" {
        tracing::warn!("Running against the in-memory store; state will not survive restarts");
        let store = db::MemoryStore::new();
        AppState::in_memory(&store, config.session_token_key.clone())
    } else {
        let pool = db::create_pool(&config.database.url).await?;
        tracing::info!("Database connection pool created");
        AppState::from_pool(pool, config.session_token_key.clone())
    };

    // Create router
    let app = api::routes::create_router(state, &config.cors_origins);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server listening on {}", config.server_address());

    // Run the server
    axum::serve(listener, app).await?;

    Ok(())
}
