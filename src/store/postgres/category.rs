use super::PgStore;
use crate::error::AppError;
use crate::model::{Category, CategoryInput, Entity};
use crate::store::{ListParams, Store};
use async_trait::async_trait;

const COLUMNS: &str = "id::BIGINT AS id, name, description, created_at, updated_at";

#[async_trait]
impl Store<Category> for PgStore {
    async fn create(&self, input: CategoryInput) -> Result<Category, AppError> {
        let input = Category::normalize(input);
        let sql = format!(
            "INSERT INTO categories (name, description, created_at, updated_at) \
             VALUES ($1, $2, NOW(), NOW()) RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(self.pool())
            .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Category, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<Category>, AppError> {
        let params = ListParams::new(params.limit, params.offset);
        let sql = format!("SELECT {COLUMNS} FROM categories ORDER BY id DESC LIMIT $1 OFFSET $2");
        tracing::debug!(sql = %sql, limit = params.limit, offset = params.offset, "query");
        let rows = sqlx::query_as::<_, Category>(&sql)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, patch: CategoryInput) -> Result<Category, AppError> {
        let patch = Category::normalize(patch);
        let sql = format!(
            "UPDATE categories SET name = $1, description = $2, updated_at = NOW() \
             WHERE id = $3 RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Category>(&sql)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::debug!(id, "delete category");
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
