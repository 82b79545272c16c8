//! Catalog route set and the axum entry point.
//!
//! axum only supplies the transport: every request lands in [`dispatch`], which
//! decodes and normalizes the path and resolves it through the crate's own
//! [`RouteTable`].

use crate::error::{AppError, TemplateError};
use crate::handlers;
use crate::models::ProductFilter;
use crate::routing::{decode_path, normalize_path, RouteTable};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// What a matched route runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Ready,
    ListProducts,
    GetProduct,
    ListCategories,
}

/// The service's routes, in dispatch order.
pub fn catalog_routes() -> Result<RouteTable<Endpoint>, TemplateError> {
    let mut table = RouteTable::new();
    table
        .route(Method::GET, "/health", Endpoint::Health)?
        .route(Method::GET, "/ready", Endpoint::Ready)?
        .route(Method::GET, "/products", Endpoint::ListProducts)?
        .route(Method::GET, "/products/{id}", Endpoint::GetProduct)?
        .route(Method::GET, "/categories", Endpoint::ListCategories)?;
    Ok(table)
}

/// Full application: dispatcher, permissive CORS origin on every response, request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let Some(decoded) = decode_path(uri.path()) else {
        tracing::debug!(%method, raw = uri.path(), "undecodable path");
        return AppError::NotFound.into_response();
    };
    let path = normalize_path(&decoded);
    let Some(matched) = state.routes.dispatch(&method, path) else {
        tracing::debug!(%method, path, "no route");
        return AppError::NotFound.into_response();
    };
    let catalog = state.catalog.as_ref();

    match matched.handler {
        Endpoint::Health => handlers::health().into_response(),
        Endpoint::Ready => handlers::ready(catalog).await.into_response(),
        Endpoint::ListProducts => {
            let pairs = Query::<Vec<(String, String)>>::try_from_uri(&uri)
                .map(|Query(q)| q)
                .unwrap_or_default();
            let filter = ProductFilter::from_query(&pairs);
            handlers::list_products(catalog, &filter).await.into_response()
        }
        Endpoint::GetProduct => handlers::get_product(catalog, &matched.params)
            .await
            .into_response(),
        Endpoint::ListCategories => handlers::list_categories(catalog).await.into_response(),
    }
}
