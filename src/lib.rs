//! Library catalog server
//!
//! A REST JSON API for managing a small library catalog: authors, books
//! grouped by category, and the publications linking them.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire repository and services on top of a connection pool
    pub fn new(config: AppConfig, pool: Pool<Postgres>) -> Self {
        let repository = repository::Repository::new(pool);
        let services = services::Services::new(repository, config.catalog.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
