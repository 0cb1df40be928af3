//! Database Module
//!
//! Owns the PostgreSQL connection pool and exposes the well repository built
//! on top of it.
//!
//! # Connection Pool
//!
//! The pool is bounded by `DB_MAX_CONNECTIONS`. Handlers beyond that limit
//! wait up to `DB_ACQUIRE_TIMEOUT_SECS` for a connection instead of failing
//! immediately, which is the service's only form of backpressure.

mod models;
mod repository;
mod well_repository;

pub use models::*;
pub use repository::{RepositoryError, RepositoryResult, WellRepository};
pub use well_repository::PgWellRepository;

#[cfg(test)]
pub use repository::mock;

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

/// Connection pool handle
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool and verify one connection
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .max_lifetime(config.max_lifetime)
            .acquire_timeout(config.acquire_timeout)
            .test_before_acquire(true)
            .connect_with(config.connect_options()?)
            .await
            .context("failed to connect to PostgreSQL")?;

        Ok(Self { pool })
    }

    /// Build the pool without opening a connection; the first query connects
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options()?);

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("failed to apply migrations")?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
