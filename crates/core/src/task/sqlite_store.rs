//! SQLite task storage implementation
//!
//! Stores tasks in a local SQLite file (or an in-memory database).

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::model::{NewTask, Task, TaskUpdate};
use super::repository::TaskRepository;
use crate::Result;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        completed BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
"#;

/// SQLite-backed task store
///
/// Each operation borrows a connection from the pool for a single
/// statement and hands it back when the statement finishes.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    /// Connect to a SQLite database
    ///
    /// Accepts `sqlite:` URLs (including `sqlite::memory:`) and bare file
    /// paths. The database file and the `tasks` table are created if missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)?
        } else {
            SqliteConnectOptions::new().filename(database_url)
        };
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        Self::connect_with(options, in_memory, max_connections).await
    }

    /// Open (or create) a SQLite database file at the given path
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(path.as_ref());
        Self::connect_with(options, false, max_connections).await
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        in_memory: bool,
        max_connections: u32,
    ) -> Result<Self> {
        let options = options
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        // An in-memory database lives only as long as its connection, so keep
        // exactly one open for the lifetime of the pool.
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options.journal_mode(SqliteJournalMode::Memory))
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        tracing::info!("SQLite task schema ready");
        Ok(())
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, completed, created_at FROM tasks \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn get(&self, id: i64) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, completed, created_at FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        task.validate()?;

        let created = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, description, completed) VALUES (?, ?, ?) \
             RETURNING id, title, description, completed, created_at",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(false)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i64, update: TaskUpdate) -> Result<bool> {
        update.validate()?;

        let result = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, completed = ? WHERE id = ?",
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.completed)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
