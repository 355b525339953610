use super::PgStore;
use crate::error::AppError;
use crate::model::{Entity, Product, ProductInput};
use crate::store::{ListParams, Store};
use async_trait::async_trait;

// Casts keep SERIAL / INTEGER / NUMERIC columns decodable as i64 and f64.
const COLUMNS: &str =
    "id::BIGINT AS id, name, price::FLOAT8 AS price, quantity::BIGINT AS quantity, created_at, updated_at";

#[async_trait]
impl Store<Product> for PgStore {
    async fn create(&self, input: ProductInput) -> Result<Product, AppError> {
        let input = Product::normalize(input);
        let sql = format!(
            "INSERT INTO products (name, price, quantity, created_at, updated_at) \
             VALUES ($1, $2, $3, NOW(), NOW()) RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.quantity)
            .fetch_one(self.pool())
            .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<Product>, AppError> {
        let params = ListParams::new(params.limit, params.offset);
        let sql = format!("SELECT {COLUMNS} FROM products ORDER BY id DESC LIMIT $1 OFFSET $2");
        tracing::debug!(sql = %sql, limit = params.limit, offset = params.offset, "query");
        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, patch: ProductInput) -> Result<Product, AppError> {
        let patch = Product::normalize(patch);
        let sql = format!(
            "UPDATE products SET name = $1, price = $2, quantity = $3, updated_at = NOW() \
             WHERE id = $4 RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Product>(&sql)
            .bind(&patch.name)
            .bind(patch.price)
            .bind(patch.quantity)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::debug!(id, "delete product");
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
