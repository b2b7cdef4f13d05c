//! Application state

use std::sync::Arc;

use todo_core::task::TaskRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: Arc<dyn TaskRepository>,
}

impl AppState {
    /// Create a new AppState around an already opened task store
    pub fn new(task_store: Arc<dyn TaskRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { task_store }),
        }
    }

    /// Open the task store named by `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> todo_core::Result<Self> {
        let task_store = todo_core::task::connect(database_url, max_connections).await?;
        Ok(Self::new(task_store))
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &dyn TaskRepository {
        self.inner.task_store.as_ref()
    }
}
