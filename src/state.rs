//! Shared application state. Read-only after startup.

use crate::error::TemplateError;
use crate::routes::{catalog_routes, Endpoint};
use crate::routing::RouteTable;
use crate::store::Catalog;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub routes: Arc<RouteTable<Endpoint>>,
}

impl AppState {
    /// State with the standard catalog route set.
    pub fn new(catalog: Arc<dyn Catalog>) -> Result<Self, TemplateError> {
        Ok(Self {
            catalog,
            routes: Arc::new(catalog_routes()?),
        })
    }
}
