//! Use-case orchestration over the repositories.
//!
//! The service holds no state of its own: it resolves category names to
//! ids, validates pagination at the boundary and delegates everything
//! else to the repository traits. Category resolution and the task write
//! are separate repository calls, not one shared transaction; a category
//! created for an update that later fails simply stays behind, which is
//! harmless since categories are created implicitly by design.

use crate::error::CoreError;
use crate::models::{
    Category, CategorySummary, NewTaskData, Page, Task, TaskFilter, TaskStatistics,
    TaskWithCategory, UpdateTaskData,
};
use crate::repository::Repository;
use chrono::Utc;
use std::sync::Arc;

pub struct TaskService<R> {
    repo: Arc<R>,
}

impl<R> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: Repository> TaskService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create_task(&self, mut data: NewTaskData) -> Result<Task, CoreError> {
        if data.category_id.is_none() {
            if let Some(name) = data.category_name.take() {
                let category = self.repo.get_or_create_category(&name).await?;
                data.category_id = Some(category.id);
            }
        }
        self.repo.create_task(data).await
    }

    pub async fn update_task(
        &self,
        id: i64,
        mut data: UpdateTaskData,
    ) -> Result<Option<Task>, CoreError> {
        if let Some(name) = data.category_name.take() {
            data.category_id = Some(match name {
                Some(name) => Some(self.repo.get_or_create_category(&name).await?.id),
                None => None,
            });
        }
        self.repo.update_task(id, data).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, CoreError> {
        self.repo.find_task_by_id(id).await
    }

    pub async fn list_tasks(
        &self,
        filter: &TaskFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TaskWithCategory>, CoreError> {
        let page = Page::new(skip, limit)?;
        self.repo.list_tasks(filter, page).await
    }

    pub async fn complete_task(&self, id: i64) -> Result<Option<Task>, CoreError> {
        self.repo.complete_task(id).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<bool, CoreError> {
        self.repo.delete_task(id).await
    }

    pub async fn overdue_tasks(&self) -> Result<Vec<Task>, CoreError> {
        self.repo.find_overdue(Utc::now()).await
    }

    pub async fn statistics(&self) -> Result<TaskStatistics, CoreError> {
        self.repo.statistics(Utc::now()).await
    }

    pub async fn category(&self, id: i64) -> Result<Option<Category>, CoreError> {
        self.repo.find_category_by_id(id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<CategorySummary>, CoreError> {
        self.repo.list_categories().await
    }

    pub async fn delete_category(&self, id: i64) -> Result<bool, CoreError> {
        self.repo.delete_category(id).await
    }
}
