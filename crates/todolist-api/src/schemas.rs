//! Wire types for the REST surface.
//!
//! Priorities travel as their numeric level (1..=3). Clearable fields of
//! the PATCH body distinguish "absent" from "explicit null" through
//! `Option<Option<T>>`, deserialized with serde_with's double_option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todolist_core::models::{CategorySummary, Task, TaskWithCategory};

#[derive(Debug, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub category_name: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub completed: Option<bool>,
    /// Case-insensitive keyword matched against title and description.
    #[serde(default)]
    pub q: Option<String>,
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub is_overdue: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<CategoryRef>,
}

impl TaskResponse {
    /// Build from a bare task plus its (already resolved) category.
    pub fn from_task(task: Task, category: Option<CategoryRef>, now: DateTime<Utc>) -> Self {
        let is_overdue = task.is_overdue(now);
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority.level(),
            due_date: task.due_date,
            is_completed: task.is_completed,
            is_overdue,
            completed_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
            category,
        }
    }

    /// Build from a list row, whose category name was joined in by the
    /// storage layer.
    pub fn from_listed(task: TaskWithCategory, now: DateTime<Utc>) -> Self {
        let is_overdue = task.is_overdue(now);
        let category = match (task.category_id, task.category_name) {
            (Some(id), Some(name)) => Some(CategoryRef { id, name }),
            _ => None,
        };
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority.level(),
            due_date: task.due_date,
            is_completed: task.is_completed,
            is_overdue,
            completed_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
            category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub task_count: i64,
}

impl From<CategorySummary> for CategoryResponse {
    fn from(summary: CategorySummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            task_count: summary.task_count,
        }
    }
}
