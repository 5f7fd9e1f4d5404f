use crate::error::CoreError;
use crate::models::{validate_category_name, Category, CategorySummary};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl super::CategoryRepository for SqliteRepository {
    async fn get_or_create_category(&self, name: &str) -> Result<Category, CoreError> {
        validate_category_name(name)?;

        // INSERT OR IGNORE against the UNIQUE(name) constraint, then
        // re-select: concurrent calls with the same name collapse to one
        // row instead of racing a read-then-create.
        let mut tx = self.pool().begin().await?;

        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        let category: Category = sqlx::query_as("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    async fn find_category_by_id(&self, id: i64) -> Result<Option<Category>, CoreError> {
        let category = sqlx::query_as("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(category)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, CoreError> {
        let category = sqlx::query_as("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CoreError> {
        let categories = sqlx::query_as(
            r#"SELECT c.id, c.name, c.description, COUNT(t.id) AS task_count
            FROM categories c
            LEFT JOIN tasks t ON t.category_id = c.id
            GROUP BY c.id, c.name, c.description
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    async fn delete_category(&self, id: i64) -> Result<bool, CoreError> {
        // Detach tasks explicitly in the same transaction; the FK's
        // ON DELETE SET NULL would not touch updated_at.
        let mut tx = self.pool().begin().await?;

        sqlx::query("UPDATE tasks SET category_id = NULL, updated_at = $1 WHERE category_id = $2")
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
