//! PostgreSQL task storage implementation

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::model::{NewTask, Task, TaskUpdate};
use super::repository::TaskRepository;
use crate::Result;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// PostgreSQL-backed task store for a managed remote database
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    /// Connect to a `postgres://` URL and make sure the `tasks` table exists
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        tracing::info!("PostgreSQL task schema ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskStore {
    fn backend(&self) -> &'static str {
        "postgres"
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
            "SELECT id, title, description, completed, created_at FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        task.validate()?;

        let created = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, description, completed) VALUES ($1, $2, $3) \
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
            "UPDATE tasks SET title = $1, description = $2, completed = $3 WHERE id = $4",
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
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
