//! Task module
//!
//! This module contains task-related types and the storage backends.

mod model;
mod postgres_store;
mod repository;
mod sqlite_store;

use std::sync::Arc;

pub use model::*;
pub use postgres_store::PostgresTaskStore;
pub use repository::TaskRepository;
pub use sqlite_store::SqliteTaskStore;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Sqlite,
    Postgres,
}

fn backend_for(database_url: &str) -> Result<Backend> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        return Ok(Backend::Postgres);
    }
    if database_url.starts_with("sqlite:") {
        return Ok(Backend::Sqlite);
    }
    match database_url.split_once("://") {
        Some((scheme, _)) => Err(Error::Storage(format!(
            "Unsupported database URL scheme: {}",
            scheme
        ))),
        // Anything without a scheme is a path to a SQLite file
        None => Ok(Backend::Sqlite),
    }
}

/// Open the task store named by `database_url`
///
/// `postgres://` and `postgresql://` URLs select PostgreSQL; `sqlite:` URLs
/// and bare file paths select SQLite.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<dyn TaskRepository>> {
    if database_url.trim().is_empty() {
        return Err(Error::InvalidInput(
            "Database URL cannot be empty".to_string(),
        ));
    }

    let store: Arc<dyn TaskRepository> = match backend_for(database_url)? {
        Backend::Postgres => {
            Arc::new(PostgresTaskStore::connect(database_url, max_connections).await?)
        }
        Backend::Sqlite => {
            Arc::new(SqliteTaskStore::connect(database_url, max_connections).await?)
        }
    };

    tracing::info!(backend = store.backend(), "Task store connected");
    Ok(store)
}
