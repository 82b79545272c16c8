//! HTTP surface built on the route table.

pub mod catalog;
pub use catalog::{app, catalog_routes, Endpoint};
