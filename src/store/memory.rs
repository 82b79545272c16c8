//! In-memory catalog with the same listing semantics as the SQL builder.

use super::{Catalog, SeedStore};
use crate::error::StoreError;
use crate::models::{Category, NewCategory, NewProduct, Product, ProductFilter};
use crate::sql::PRODUCT_LIST_CAP;
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    categories: Vec<Category>,
}

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
    unavailable: bool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                products,
                categories,
            }),
            unavailable: false,
        }
    }

    /// A catalog whose every operation fails, for exercising the 500 path.
    pub fn unavailable() -> Self {
        Self {
            tables: RwLock::default(),
            unavailable: true,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        self.tables.read().map_err(|_| StoreError::Unavailable)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        self.tables.write().map_err(|_| StoreError::Unavailable)
    }
}

fn matches_filter(p: &Product, filter: &ProductFilter) -> bool {
    if let Some(category) = filter.category() {
        if p.category != category {
            return false;
        }
    }
    if let Some(term) = filter.search() {
        let term = term.to_lowercase();
        return [&p.name, &p.description, &p.brand]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
    }
    true
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let tables = self.read()?;
        let mut rows: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| matches_filter(p, filter))
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.id);
        rows.truncate(PRODUCT_LIST_CAP as usize);
        Ok(rows)
    }

    async fn get_product(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let tables = self.read()?;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.read()?;
        let mut rows = tables.categories.clone();
        rows.sort_by_key(|c| c.id);
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}

#[async_trait]
impl SeedStore for MemoryCatalog {
    async fn count_categories(&self) -> Result<i64, StoreError> {
        Ok(self.read()?.categories.len() as i64)
    }

    async fn count_products(&self) -> Result<i64, StoreError> {
        Ok(self.read()?.products.len() as i64)
    }

    async fn insert_categories(&self, rows: &[NewCategory<'_>]) -> Result<usize, StoreError> {
        let mut tables = self.write()?;
        for (i, category) in rows.iter().enumerate() {
            let taken = tables.categories.iter().any(|c| c.slug == category.slug)
                || rows[..i].iter().any(|c| c.slug == category.slug);
            if taken {
                return Err(StoreError::Rejected(format!(
                    "duplicate category slug '{}'",
                    category.slug
                )));
            }
        }
        let mut id = tables.categories.iter().map(|c| c.id).max().unwrap_or(0);
        for category in rows {
            id += 1;
            tables.categories.push(Category {
                id,
                name: category.name.to_string(),
                slug: category.slug.to_string(),
            });
        }
        Ok(rows.len())
    }

    async fn insert_products(&self, rows: &[NewProduct<'_>]) -> Result<usize, StoreError> {
        let mut tables = self.write()?;
        if let Some(bad) = rows.iter().find(|p| p.price < 0.0 || p.stock < 0) {
            return Err(StoreError::Rejected(format!(
                "negative price or stock for '{}'",
                bad.name
            )));
        }
        let mut id = tables.products.iter().map(|p| p.id).max().unwrap_or(0);
        let now = chrono::Utc::now();
        for product in rows {
            id += 1;
            tables.products.push(Product {
                id,
                name: product.name.to_string(),
                description: product.description.to_string(),
                price: product.price,
                category: product.category.to_string(),
                brand: product.brand.to_string(),
                stock: product.stock,
                image_url: product.image_url.to_string(),
                created_at: now,
            });
        }
        Ok(rows.len())
    }
}
