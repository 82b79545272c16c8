//! Typed errors and HTTP mapping.

use crate::response::error_response;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Malformed route template. Raised while the route table is built at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated placeholder at byte {position} in template '{template}'")]
    Unterminated { template: String, position: usize },
    #[error("empty placeholder name at byte {position} in template '{template}'")]
    EmptyName { template: String, position: usize },
    #[error("invalid placeholder name '{name}' in template '{template}'")]
    InvalidName { template: String, name: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

/// Failure of the storage collaborator. Always surfaced to callers as "unavailable".
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("storage unavailable")]
    Unavailable,
    #[error("rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not connect to database after {attempts} attempts: {source}")]
    ConnectExhausted {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
    #[error("schema bootstrap: {0}")]
    Schema(#[from] sqlx::Error),
    #[error("seed: {0}")]
    Seed(#[from] StoreError),
}

/// Request-time outcome that is not a success body.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => error_response(StatusCode::NOT_FOUND, "Not found"),
            AppError::Store(e) => {
                tracing::error!(error = %e, "storage query failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "DB error")
            }
        }
    }
}
