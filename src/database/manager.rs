use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config;

static CLIENT: OnceCell<Client> = OnceCell::const_new();

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid record id: {0}")]
    InvalidId(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Process-wide MongoDB access. The client is created lazily on first use so
/// the server can start (and serve in-memory resources) without a database.
pub struct DatabaseManager;

impl DatabaseManager {
    async fn client() -> Result<&'static Client, DatabaseError> {
        CLIENT
            .get_or_try_init(|| async {
                let cfg = &config::config().database;
                let mut options = ClientOptions::parse(&cfg.url)
                    .await
                    .map_err(|e| DatabaseError::Connection(e.to_string()))?;
                options.max_pool_size = Some(cfg.max_pool_size);
                options.server_selection_timeout =
                    Some(Duration::from_secs(cfg.connect_timeout_secs));
                options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

                Client::with_options(options)
                    .map_err(|e| DatabaseError::Connection(e.to_string()))
            })
            .await
    }

    pub async fn database() -> Result<Database, DatabaseError> {
        let client = Self::client().await?;
        Ok(client.database(&config::config().database.name))
    }

    /// Typed collection handle for one of the LMS collections.
    pub async fn collection<T>(name: &str) -> Result<Collection<T>, DatabaseError> {
        Ok(Self::database().await?.collection::<T>(name))
    }

    /// Ping the server; used by the /health endpoint.
    pub async fn health_check() -> Result<(), DatabaseError> {
        let db = Self::database().await?;
        db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
