//! Gas Wells API Library
//!
//! # Overview
//!
//! Records well engineering parameters and keeps every stored well valid:
//! inputs are validated, the derived maximum pressure is computed by the
//! service, and persistence goes through a repository trait.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          API                              │
//! │                                                           │
//! │  ┌─────────┐   ┌─────────────┐   ┌────────────────────┐  │
//! │  │ Routes  │──►│ WellService │──►│ dyn WellRepository │  │
//! │  └─────────┘   └──────┬──────┘   └─────────┬──────────┘  │
//! │                       │                    │              │
//! │             validation, calculation        │              │
//! └────────────────────────────────────────────┼──────────────┘
//!                                              ▼
//!                                     ┌────────────────┐
//!                                     │   PostgreSQL   │
//!                                     └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: environment configuration
//! - `error`: HTTP error mapping
//! - `routes`: HTTP endpoint handlers
//! - `services`: well lifecycle and the pmax calculation
//! - `shutdown`: Ctrl+C / SIGTERM handling
//! - `db`: connection pool, repository contract and PostgreSQL adapter
//! - `types`: the well entity and paging
//! - `validation`: predicates and the error accumulator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gas_wells_api::{config::Config, db::{Database, PgWellRepository}, WellService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database).await?;
//!     let repo = PgWellRepository::new(db.pool().clone(), config.database.statement_timeout);
//!     let wells = WellService::new(Arc::new(repo));
//!
//!     // ... start the server
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod shutdown;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::ApiError;
pub use services::WellService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub wells: Arc<WellService>,
    pub config: Arc<Config>,
}
