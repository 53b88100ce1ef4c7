use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shipping_api::auth::TokenVerifier;
use shipping_api::config::config;
use shipping_api::database::open_store;
use shipping_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shipping_api=info,tower_http=info")),
        )
        .init();

    let config = config();
    tracing::info!("Starting Daily Shipping API in {:?} mode", config.environment);

    let store = open_store(&config.database, config.environment)
        .await
        .context("failed to open the store")?;
    let verifier = TokenVerifier::from_config(&config.auth).context("failed to load signing keys")?;

    let state = AppState::new(store, verifier).excited(config.server.excited);
    let app = app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Daily Shipping API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
