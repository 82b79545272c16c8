//! PostgreSQL-backed catalog.

use super::{Catalog, SeedStore};
use crate::error::StoreError;
use crate::models::{Category, NewCategory, NewProduct, Product, ProductFilter};
use crate::sql::{bind_all, select_categories, select_product_by_id, select_products};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let q = select_products(filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query_as::<_, Product>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_product(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let q = select_product_by_id(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query_as::<_, Product>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let q = select_categories();
        tracing::debug!(sql = %q.sql, "query");
        let rows = bind_all(sqlx::query_as::<_, Category>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SeedStore for PgCatalog {
    async fn count_categories(&self) -> Result<i64, StoreError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn count_products(&self) -> Result<i64, StoreError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn insert_categories(&self, rows: &[NewCategory<'_>]) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;
        for category in rows {
            sqlx::query("INSERT INTO categories (name, slug) VALUES ($1, $2)")
                .bind(category.name)
                .bind(category.slug)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(rows.len())
    }

    async fn insert_products(&self, rows: &[NewProduct<'_>]) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;
        for product in rows {
            sqlx::query(
                r#"INSERT INTO products (name, description, price, category, brand, stock, image_url)
                   VALUES ($1, $2, $3::numeric, $4, $5, $6, $7)"#,
            )
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(product.category)
            .bind(product.brand)
            .bind(product.stock)
            .bind(product.image_url)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(rows.len())
    }
}
