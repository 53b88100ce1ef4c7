use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::{info, warn};

use super::{MemoryStore, PgStore, Store, StoreError};
use crate::config::{DatabaseConfig, Environment};

/// `DATABASE_URL` value selecting the in-process store
pub const MEMORY_URL: &str = "memory";

/// Errors opening the persistence gateway
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Schema bootstrap failed: {0}")]
    Bootstrap(#[from] StoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open the store once at process start; handlers share it through `AppState`
pub async fn open_store(
    config: &DatabaseConfig,
    environment: Environment,
) -> Result<Arc<dyn Store>, DatabaseError> {
    let url = match config.url.as_deref() {
        Some(url) => url,
        None if environment == Environment::Development => {
            warn!("DATABASE_URL not set; using the in-memory store");
            MEMORY_URL
        }
        None => return Err(DatabaseError::ConfigMissing("DATABASE_URL")),
    };

    if url == MEMORY_URL {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    if !matches!(parsed.scheme(), "postgres" | "postgresql") {
        return Err(DatabaseError::InvalidDatabaseUrl);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(url)
        .await?;

    // Log without credentials
    info!(
        "Created database pool for {}{}",
        parsed.host_str().unwrap_or("localhost"),
        parsed.path()
    );

    let store = PgStore::new(pool);
    if config.bootstrap_schema {
        store.bootstrap_schema().await?;
    }
    Ok(Arc::new(store))
}
