//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{NewTask, Task, TaskUpdate};
use crate::Result;

/// Repository interface for task CRUD operations
///
/// Every method issues exactly one statement against the `tasks` table.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Short name of the storage engine, e.g. `"sqlite"`
    fn backend(&self) -> &'static str;

    /// Get all tasks, newest first
    async fn list(&self) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Create a new task, returning the stored record
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Overwrite a task's mutable fields. Returns false if no row matched.
    async fn update(&self, id: i64, update: TaskUpdate) -> Result<bool>;

    /// Delete a task by ID. Returns false if no row matched.
    async fn delete(&self, id: i64) -> Result<bool>;
}
