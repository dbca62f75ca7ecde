//! Todo Backend
//!
//! Layered architecture:
//! - domain: Item entity, validation, ordering, ID generation
//! - repository: Data access abstractions and implementations
//! - handlers: axum handlers for the `/items` API
//! - server: Listener lifecycle with graceful shutdown

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod server;

use std::sync::Arc;

use config::{ServerConfig, StorageKind};
use error::ServerError;
use handlers::AppState;
use domain::IdGenerator;
use repository::{MemoryRepository, SqliteRepository};

pub use handlers::router;
pub use server::Server;

/// Open the configured store and wrap it in handler state
pub async fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    config.validate()?;
    match config.storage {
        StorageKind::Memory => {
            let repo = Arc::new(MemoryRepository::new());
            let state = AppState::new(repo.clone());
            if config.sample_data {
                repo.seed_sample(&state.ids).await;
            }
            Ok(state)
        }
        StorageKind::Sqlite => {
            let dir = config.persist_dir.as_ref().ok_or_else(|| {
                ServerError::InvalidConfig("sqlite storage needs a persist_dir".to_string())
            })?;
            std::fs::create_dir_all(dir).map_err(|source| ServerError::PersistDir {
                path: dir.clone(),
                source,
            })?;
            let path = dir.join(repository::DATABASE_FILE);
            tracing::info!("using database {}", path.display());
            let repo = SqliteRepository::open(&path)?;
            let ids = match repo.latest_created_at().await? {
                Some(last) => IdGenerator::starting_after(last),
                None => IdGenerator::new(),
            };
            Ok(AppState::with_ids(Arc::new(repo), ids))
        }
    }
}
