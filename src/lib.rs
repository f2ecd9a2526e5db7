//! Feedback Server Library
//!
//! Account registration, login and per-user feedback posts over HTML forms.
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod session;
pub mod views;

pub use config::Config;
pub use db::{create_pool, open_database, run_migrations};
pub use error::{AppError, Result};
pub use routes::router;

use sqlx::SqlitePool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given pool and configuration
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self { pool, config }
    }
}
