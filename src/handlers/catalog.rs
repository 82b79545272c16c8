//! Catalog handlers: health, readiness, product listing and lookup, categories.
//!
//! Handlers receive the storage capability and the already-extracted route
//! parameters; they never touch the raw request.

use crate::error::AppError;
use crate::models::{Category, Product, ProductFilter};
use crate::routing::Params;
use crate::store::Catalog;
use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const SERVICE_NAME: &str = "guitarshop-catalog";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthBody {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReadyBody {
    pub status: &'static str,
    pub database: &'static str,
}

pub fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "UP",
        service: SERVICE_NAME,
    })
}

pub async fn ready(catalog: &dyn Catalog) -> (StatusCode, Json<ReadyBody>) {
    match catalog.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyBody {
                status: "UP",
                database: "UP",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "DOWN",
                    database: "DOWN",
                }),
            )
        }
    }
}

pub async fn list_products(
    catalog: &dyn Catalog,
    filter: &ProductFilter,
) -> Result<Json<Vec<Product>>, AppError> {
    let rows = catalog.list_products(filter).await?;
    Ok(Json(rows))
}

/// An id that is not an integer cannot name a row, so it is reported as absent.
pub async fn get_product(catalog: &dyn Catalog, params: &Params) -> Result<Json<Product>, AppError> {
    let id: i32 = params
        .get("id")
        .and_then(|raw| raw.parse().ok())
        .ok_or(AppError::NotFound)?;
    let product = catalog.get_product(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(product))
}

pub async fn list_categories(catalog: &dyn Catalog) -> Result<Json<Vec<Category>>, AppError> {
    let rows = catalog.list_categories().await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::seed;
    use crate::routing::Template;
    use crate::store::MemoryCatalog;

    async fn seeded() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        seed(&catalog).await.unwrap();
        catalog
    }

    fn id_params(id: &str) -> Params {
        Template::parse("/products/{id}")
            .unwrap()
            .matches(&format!("/products/{}", id))
            .unwrap()
    }

    #[test]
    fn health_is_fixed() {
        let Json(body) = health();
        assert_eq!(body.status, "UP");
        assert_eq!(body.service, "guitarshop-catalog");
    }

    #[tokio::test]
    async fn ready_reflects_storage() {
        let (status, _) = ready(&seeded().await).await;
        assert_eq!(status, StatusCode::OK);
        let (status, Json(body)) = ready(&MemoryCatalog::unavailable()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.database, "DOWN");
    }

    #[tokio::test]
    async fn get_existing_product() {
        let catalog = seeded().await;
        let Json(p) = get_product(&catalog, &id_params("1")).await.unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(p.name, "Fender Stratocaster Player");
    }

    #[tokio::test]
    async fn absent_and_unavailable_are_distinct() {
        let catalog = seeded().await;
        assert!(matches!(
            get_product(&catalog, &id_params("999")).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            get_product(&catalog, &id_params("abc")).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            get_product(&MemoryCatalog::unavailable(), &id_params("1")).await,
            Err(AppError::Store(_))
        ));
    }

    #[tokio::test]
    async fn listing_with_filters() {
        let catalog = seeded().await;
        let amps = ProductFilter::new(Some("Amplifiers".into()), None);
        let Json(rows) = list_products(&catalog, &amps).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|p| p.category == "Amplifiers"));

        let strat = ProductFilter::new(None, Some("strat".into()));
        let Json(rows) = list_products(&catalog, &strat).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].name.contains("Stratocaster"));
    }

    #[tokio::test]
    async fn categories_are_listed_in_id_order() {
        let Json(rows) = list_categories(&seeded().await).await.unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].slug, "electric-guitars");
        assert_eq!(rows[5].slug, "accessories");
    }
}
