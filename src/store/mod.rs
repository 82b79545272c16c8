//! Storage capabilities injected into handlers and the seeding bootstrap.
//!
//! [`Catalog`] is the read side used on the request path. [`SeedStore`] is the
//! write side used once at startup. Both are implemented by [`PgCatalog`] and by
//! [`MemoryCatalog`], the in-memory stand-in for tests and local runs.

mod memory;
mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

use crate::error::StoreError;
use crate::models::{Category, NewCategory, NewProduct, Product, ProductFilter};
use async_trait::async_trait;

#[async_trait]
pub trait Catalog: Send + Sync {
    /// At most [`crate::sql::PRODUCT_LIST_CAP`] rows ordered by id. Never fails on zero matches.
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// `Ok(None)` when no row has this id.
    async fn get_product(&self, id: i32) -> Result<Option<Product>, StoreError>;

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Cheap liveness check for the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Batch inserts are all-or-nothing: on error no row of the batch is kept.
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn count_categories(&self) -> Result<i64, StoreError>;
    async fn count_products(&self) -> Result<i64, StoreError>;
    async fn insert_categories(&self, rows: &[NewCategory<'_>]) -> Result<usize, StoreError>;
    async fn insert_products(&self, rows: &[NewProduct<'_>]) -> Result<usize, StoreError>;
}
