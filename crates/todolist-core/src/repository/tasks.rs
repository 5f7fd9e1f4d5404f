use crate::error::CoreError;
use crate::models::{
    validate_description, validate_title, NewTaskData, Page, Task, TaskFilter, TaskStatistics,
    TaskWithCategory, UpdateTaskData,
};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        validate_title(&data.title)?;
        validate_description(data.description.as_deref())?;

        let now = Utc::now();
        let task = sqlx::query_as(
            r#"INSERT INTO tasks (title, description, priority, due_date, is_completed, created_at, updated_at, category_id)
            VALUES ($1, $2, $3, $4, 0, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.priority.unwrap_or_default())
        .bind(data.due_date)
        .bind(now)
        .bind(now)
        .bind(data.category_id)
        .fetch_one(self.pool())
        .await?;

        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn list_tasks(
        &self,
        filter: &TaskFilter,
        page: Page,
    ) -> Result<Vec<TaskWithCategory>, CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"SELECT t.*, c.name AS category_name
            FROM tasks t
            LEFT JOIN categories c ON t.category_id = c.id
            WHERE 1 = 1"#,
        );

        if let Some(completed) = filter.completed {
            qb.push(" AND t.is_completed = ");
            qb.push_bind(completed);
        }

        if let Some(keyword) = filter.search.as_deref() {
            let pattern = format!("%{}%", keyword.to_lowercase());
            qb.push(" AND (LOWER(t.title) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR LOWER(t.description) LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        qb.push(" ORDER BY t.id ASC LIMIT ");
        qb.push_bind(page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(page.skip());

        let tasks = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE is_completed = 0 AND due_date IS NOT NULL AND due_date < $1
            ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(now)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn close_overdue(&self, now: DateTime<Utc>) -> Result<u64, CoreError> {
        // Single UPDATE: readers never observe a partially-closed overdue set
        // or a completed task without completed_at.
        let result = sqlx::query(
            r#"UPDATE tasks
            SET is_completed = 1, completed_at = $1, updated_at = $2
            WHERE is_completed = 0 AND due_date IS NOT NULL AND due_date < $3
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn complete_task(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let now = Utc::now();
        // Flags are set in one statement; the is_completed guard makes the
        // call idempotent.
        let updated: Option<Task> = sqlx::query_as(
            r#"UPDATE tasks
            SET is_completed = 1, completed_at = $1, updated_at = $2
            WHERE id = $3 AND is_completed = 0
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        match updated {
            Some(task) => Ok(Some(task)),
            // Either already completed (return unchanged) or missing.
            None => self.find_task_by_id(id).await,
        }
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

        let mut tx = self.pool().begin().await?;

        let existing: Option<Task> = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        if data.is_empty() {
            return Ok(Some(existing));
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tasks SET ");
        let mut fields = qb.separated(", ");

        if let Some(title) = &data.title {
            fields.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = &data.description {
            fields
                .push("description = ")
                .push_bind_unseparated(description.as_deref());
        }
        if let Some(priority) = data.priority {
            fields.push("priority = ").push_bind_unseparated(priority);
        }
        if let Some(due_date) = &data.due_date {
            fields.push("due_date = ").push_bind_unseparated(*due_date);
        }
        if let Some(category_id) = &data.category_id {
            fields
                .push("category_id = ")
                .push_bind_unseparated(*category_id);
        }
        fields
            .push("updated_at = ")
            .push_bind_unseparated(Utc::now());

        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.build().execute(&mut *tx).await?;

        let updated: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete_task(&self, id: i64) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn statistics(&self, now: DateTime<Utc>) -> Result<TaskStatistics, CoreError> {
        // One SELECT so all four counts come from the same snapshot.
        let (total, completed, overdue): (i64, i64, i64) = sqlx::query_as(
            r#"SELECT
                COUNT(*),
                COALESCE(SUM(is_completed), 0),
                COALESCE(SUM(CASE
                    WHEN is_completed = 0 AND due_date IS NOT NULL AND due_date < $1
                    THEN 1 ELSE 0 END), 0)
            FROM tasks
            "#,
        )
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        Ok(TaskStatistics {
            total,
            completed,
            pending: total - completed,
            overdue,
        })
    }
}
