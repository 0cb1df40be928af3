//! Services Module
//!
//! Business logic layer
//!
//! # Services
//! - `WellService`: well lifecycle (validate, derive, persist)
//! - `calculation`: derived maximum pressure formula

pub mod calculation;
mod well_service;

pub use calculation::{calculate, CalculationError};
pub use well_service::{WellError, WellResult, WellService};
