//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const TITLE_REQUIRED: &str = "Title is required";

/// A task as stored in the `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task
///
/// The store assigns `id` and `created_at`; new tasks always start
/// with `completed = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

impl NewTask {
    /// Create a new task input with an empty description
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }
}

/// Replacement values for an existing task
///
/// An update overwrites all three mutable fields; `id` and `created_at`
/// are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TaskUpdate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the completion flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::InvalidInput(TITLE_REQUIRED.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = NewTask::new("Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "");
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_new_task_with_description() {
        let task = NewTask::new("Buy milk").with_description("2 liters");
        assert_eq!(task.description, "2 liters");
    }

    #[test]
    fn test_empty_title_is_rejected() {
        match NewTask::new("").validate() {
            Err(Error::InvalidInput(msg)) => assert_eq!(msg, TITLE_REQUIRED),
            other => panic!("Expected InvalidInput, got: {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_title_is_accepted() {
        assert!(NewTask::new("   ").validate().is_ok());
        assert!(TaskUpdate::new("\t").validate().is_ok());
    }

    #[test]
    fn test_update_defaults_and_validation() {
        let update = TaskUpdate::default();
        assert_eq!(update.description, "");
        assert!(!update.completed);
        assert!(update.validate().is_err());

        let update = TaskUpdate::new("Walk dog").with_completed(true);
        assert!(update.completed);
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task {
            id: 3,
            title: "Buy milk".to_string(),
            description: String::new(),
            completed: false,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T10:15:30Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["title"], "Buy milk");
        assert_eq!(value["description"], "");
        assert_eq!(value["completed"], false);
        assert_eq!(value["created_at"], "2024-05-01T10:15:30Z");
    }
}
