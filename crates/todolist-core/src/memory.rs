//! In-memory repository backend.
//!
//! An owned arena behind a mutex with internal next-id counters, matching
//! the contracts of the SQLite backend. Useful for tests and for running
//! the tracker without a database file.

use crate::error::CoreError;
use crate::models::{
    validate_category_name, validate_description, validate_title, Category, CategorySummary,
    NewTaskData, Page, Task, TaskFilter, TaskStatistics, TaskWithCategory, UpdateTaskData,
};
use crate::repository::{CategoryRepository, Repository, TaskRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryStore {
    tasks: BTreeMap<i64, Task>,
    categories: BTreeMap<i64, Category>,
    next_task_id: i64,
    next_category_id: i64,
}

impl MemoryStore {
    fn next_task_id(&mut self) -> i64 {
        self.next_task_id += 1;
        self.next_task_id
    }

    fn next_category_id(&mut self) -> i64 {
        self.next_category_id += 1;
        self.next_category_id
    }
}

/// Mutex-guarded arena implementing the repository traits. Every
/// operation runs inside one critical section, so bulk closure and
/// statistics are atomic from the caller's point of view.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    store: Mutex<MemoryStore>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, MemoryStore> {
        // A poisoned lock only means another thread panicked mid-write;
        // the arena itself stays structurally valid.
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TaskRepository for MemoryRepository {
    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        validate_title(&data.title)?;
        validate_description(data.description.as_deref())?;

        let mut store = self.store();
        let now = Utc::now();
        let task = Task {
            id: store.next_task_id(),
            title: data.title,
            description: data.description,
            priority: data.priority.unwrap_or_default(),
            due_date: data.due_date,
            is_completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
            category_id: data.category_id,
        };
        store.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        Ok(self.store().tasks.get(&id).cloned())
    }

    async fn list_tasks(
        &self,
        filter: &TaskFilter,
        page: Page,
    ) -> Result<Vec<TaskWithCategory>, CoreError> {
        let store = self.store();
        let keyword = filter.search.as_deref().map(str::to_lowercase);

        // BTreeMap iteration is id-ascending, matching the SQL ordering.
        let tasks = store
            .tasks
            .values()
            .filter(|task| {
                filter
                    .completed
                    .is_none_or(|completed| task.is_completed == completed)
            })
            .filter(|task| {
                keyword.as_deref().is_none_or(|kw| {
                    task.title.to_lowercase().contains(kw)
                        || task
                            .description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(kw))
                })
            })
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .map(|task| TaskWithCategory {
                id: task.id,
                title: task.title.clone(),
                description: task.description.clone(),
                priority: task.priority,
                due_date: task.due_date,
                is_completed: task.is_completed,
                completed_at: task.completed_at,
                created_at: task.created_at,
                updated_at: task.updated_at,
                category_id: task.category_id,
                category_name: task
                    .category_id
                    .and_then(|id| store.categories.get(&id))
                    .map(|c| c.name.clone()),
            })
            .collect();
        Ok(tasks)
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Task>, CoreError> {
        let store = self.store();
        let mut overdue: Vec<Task> = store
            .tasks
            .values()
            .filter(|task| task.is_overdue(now))
            .cloned()
            .collect();
        overdue.sort_by_key(|task| (task.due_date, task.id));
        Ok(overdue)
    }

    async fn close_overdue(&self, now: DateTime<Utc>) -> Result<u64, CoreError> {
        let mut store = self.store();
        let mut closed = 0;
        for task in store.tasks.values_mut() {
            if task.is_overdue(now) {
                task.is_completed = true;
                task.completed_at = Some(now);
                task.updated_at = now;
                closed += 1;
            }
        }
        Ok(closed)
    }

    async fn complete_task(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let mut store = self.store();
        let Some(task) = store.tasks.get_mut(&id) else {
            return Ok(None);
        };
        if !task.is_completed {
            let now = Utc::now();
            task.is_completed = true;
            task.completed_at = Some(now);
            task.updated_at = now;
        }
        Ok(Some(task.clone()))
    }

    async fn update_task(
        &self,
        id: i64,
        data: UpdateTaskData,
    ) -> Result<Option<Task>, CoreError> {
        if let Some(title) = &data.title {
            validate_title(title)?;
        }
        if let Some(description) = &data.description {
            validate_description(description.as_deref())?;
        }

        let mut store = self.store();
        let Some(task) = store.tasks.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = description;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if let Some(due_date) = data.due_date {
            task.due_date = due_date;
        }
        if let Some(category_id) = data.category_id {
            task.category_id = category_id;
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: i64) -> Result<bool, CoreError> {
        Ok(self.store().tasks.remove(&id).is_some())
    }

    async fn statistics(&self, now: DateTime<Utc>) -> Result<TaskStatistics, CoreError> {
        let store = self.store();
        let total = store.tasks.len() as i64;
        let completed = store.tasks.values().filter(|t| t.is_completed).count() as i64;
        let overdue = store.tasks.values().filter(|t| t.is_overdue(now)).count() as i64;
        Ok(TaskStatistics {
            total,
            completed,
            pending: total - completed,
            overdue,
        })
    }
}

#[async_trait]
impl CategoryRepository for MemoryRepository {
    async fn get_or_create_category(&self, name: &str) -> Result<Category, CoreError> {
        validate_category_name(name)?;

        let mut store = self.store();
        if let Some(existing) = store.categories.values().find(|c| c.name == name) {
            return Ok(existing.clone());
        }
        let category = Category {
            id: store.next_category_id(),
            name: name.to_string(),
            description: None,
        };
        store.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_category_by_id(&self, id: i64) -> Result<Option<Category>, CoreError> {
        Ok(self.store().categories.get(&id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, CoreError> {
        Ok(self
            .store()
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CoreError> {
        let store = self.store();
        let mut summaries: Vec<CategorySummary> = store
            .categories
            .values()
            .map(|category| CategorySummary {
                id: category.id,
                name: category.name.clone(),
                description: category.description.clone(),
                task_count: store
                    .tasks
                    .values()
                    .filter(|t| t.category_id == Some(category.id))
                    .count() as i64,
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    async fn delete_category(&self, id: i64) -> Result<bool, CoreError> {
        let mut store = self.store();
        if store.categories.remove(&id).is_none() {
            return Ok(false);
        }
        let now = Utc::now();
        for task in store.tasks.values_mut() {
            if task.category_id == Some(id) {
                task.category_id = None;
                task.updated_at = now;
            }
        }
        Ok(true)
    }
}

impl Repository for MemoryRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() {
        let repo = MemoryRepository::new();
        let first = repo
            .create_task(NewTaskData {
                title: "first".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let second = repo
            .create_task(NewTaskData {
                title: "second".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(second.id > first.id);

        assert!(repo.delete_task(second.id).await.unwrap());
        let third = repo
            .create_task(NewTaskData {
                title: "third".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn close_overdue_sets_both_flags_at_once() {
        let repo = MemoryRepository::new();
        let now = Utc::now();
        repo.create_task(NewTaskData {
            title: "late".to_string(),
            due_date: Some(now - Duration::hours(1)),
            ..Default::default()
        })
        .await
        .unwrap();
        repo.create_task(NewTaskData {
            title: "future".to_string(),
            due_date: Some(now + Duration::hours(1)),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(repo.close_overdue(now).await.unwrap(), 1);
        for task in repo.list_tasks(&TaskFilter::default(), Page::default())
            .await
            .unwrap()
        {
            assert_eq!(task.is_completed, task.completed_at.is_some());
        }
        // Idempotent: nothing left to close.
        assert_eq!(repo.close_overdue(now).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleting_category_detaches_tasks() {
        let repo = MemoryRepository::new();
        let category = repo.get_or_create_category("Work").await.unwrap();
        let task = repo
            .create_task(NewTaskData {
                title: "report".to_string(),
                category_id: Some(category.id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(repo.delete_category(category.id).await.unwrap());
        let task = repo.find_task_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(task.category_id, None);
    }
}
