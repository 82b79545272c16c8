//! Catalog service: read-only product and category API over PostgreSQL.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod routing;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, BootstrapError, ConfigError, StoreError, TemplateError};
pub use routes::{app, catalog_routes, Endpoint};
pub use routing::{decode_path, normalize_path, Params, RouteTable, Template};
pub use state::AppState;
pub use store::{Catalog, MemoryCatalog, PgCatalog, SeedStore};
