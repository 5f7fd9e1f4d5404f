use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    Category, CategorySummary, NewTaskData, Page, Task, TaskFilter, TaskStatistics,
    TaskWithCategory, UpdateTaskData,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// Domain modules implement the traits for SqliteRepository
pub mod categories;
pub mod tasks;

/// Domain-specific trait for task operations.
///
/// Absence is signalled with `Option`/`bool` rather than errors; callers
/// branch on it. All time-dependent reads take the evaluation instant so
/// every task in one call is compared against the same `now`.
#[async_trait]
pub trait TaskRepository {
    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    /// Tasks matching `filter`, ordered by id ascending so pagination is
    /// stable, windowed by `page`.
    async fn list_tasks(
        &self,
        filter: &TaskFilter,
        page: Page,
    ) -> Result<Vec<TaskWithCategory>, CoreError>;
    async fn find_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Task>, CoreError>;
    /// Completes every task overdue at `now` in one atomic step and
    /// returns how many were closed. Zero overdue tasks is not an error.
    async fn close_overdue(&self, now: DateTime<Utc>) -> Result<u64, CoreError>;
    /// Idempotent: completing an already-completed task returns its
    /// current state unchanged.
    async fn complete_task(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn update_task(&self, id: i64, data: UpdateTaskData)
        -> Result<Option<Task>, CoreError>;
    /// Returns whether the task existed. Never cascades to the category.
    async fn delete_task(&self, id: i64) -> Result<bool, CoreError>;
    /// Counts computed from a single consistent view; `overdue` derives
    /// from the same predicate as [`find_overdue`](Self::find_overdue).
    async fn statistics(&self, now: DateTime<Utc>) -> Result<TaskStatistics, CoreError>;
}

/// Domain-specific trait for category operations.
#[async_trait]
pub trait CategoryRepository {
    /// Returns the category with `name`, creating it first if absent.
    /// Concurrent calls with the same name resolve to one row.
    async fn get_or_create_category(&self, name: &str) -> Result<Category, CoreError>;
    async fn find_category_by_id(&self, id: i64) -> Result<Option<Category>, CoreError>;
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, CoreError>;
    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CoreError>;
    /// Detaches the category's tasks, then removes it. Returns whether it
    /// existed.
    async fn delete_category(&self, id: i64) -> Result<bool, CoreError>;
}

/// Main repository trait that composes the domain traits.
#[async_trait]
pub trait Repository: TaskRepository + CategoryRepository + Send + Sync {}

/// SQLite implementation of the repository pattern.
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Pool accessor for the domain modules.
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
