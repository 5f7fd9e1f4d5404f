use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;

/// Title must be at least this many characters.
pub const TITLE_MIN_CHARS: usize = 3;
/// Title must be at most this many characters.
pub const TITLE_MAX_CHARS: usize = 200;
/// Description, when present, must be at most this many characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
/// Upper bound for a single page of list results.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Priority levels, persisted as their integer value (1..=3).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum TaskPriority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl TaskPriority {
    /// The numeric level stored in the database and exposed over the API.
    pub fn level(self) -> i32 {
        self as i32
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0} (expected low/medium/high or 1-3)")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "1" => Ok(TaskPriority::Low),
            "medium" | "2" => Ok(TaskPriority::Medium),
            "high" | "3" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl TryFrom<i32> for TaskPriority {
    type Error = CoreError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(TaskPriority::Low),
            2 => Ok(TaskPriority::Medium),
            3 => Ok(TaskPriority::High),
            _ => Err(CoreError::Validation(format!(
                "priority must be 1 (low), 2 (medium) or 3 (high), got {level}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: Option<i64>,
}

impl Task {
    /// Computed predicate, never stored: a task is overdue iff it has a due
    /// date in the past relative to `now` and has not been completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// A task joined with its category name, as returned by list queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskWithCategory {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl TaskWithCategory {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due < now)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A category together with how many tasks currently reference it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub task_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub category_name: Option<String>, // Resolved by the service layer
    pub category_id: Option<i64>,      // Used internally once resolved
}

/// Partial update: only fields that are `Some` are applied. Clearable
/// fields use `Option<Option<T>>` so "unset" stays distinct from
/// "set to null".
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub category_name: Option<Option<String>>, // Resolved by the service layer
    pub category_id: Option<Option<i64>>,      // Used internally once resolved
}

impl UpdateTaskData {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.category_name.is_none()
            && self.category_id.is_none()
    }
}

/// Filter for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    /// Case-insensitive substring match against title OR description.
    pub search: Option<String>,
}

/// A validated pagination window. Construct via [`Page::new`] so the
/// bounds (`skip >= 0`, `1 <= limit <= 100`) hold everywhere.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    skip: i64,
    limit: i64,
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Result<Self, CoreError> {
        if skip < 0 {
            return Err(CoreError::Validation(format!(
                "skip must be >= 0, got {skip}"
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"
            )));
        }
        Ok(Self { skip, limit })
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub overdue: i64,
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if len < TITLE_MIN_CHARS {
        return Err(CoreError::Validation(format!(
            "title must be at least {TITLE_MIN_CHARS} characters"
        )));
    }
    if len > TITLE_MAX_CHARS {
        return Err(CoreError::Validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(CoreError::Validation(format!(
                "description must be at most {DESCRIPTION_MAX_CHARS} characters"
            )));
        }
    }
    Ok(())
}

pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(())
}
