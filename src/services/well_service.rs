//! Well Service
//!
//! Orchestrates validation, the derived-value calculation, and repository
//! calls. Depends only on [`WellRepository`], never on a concrete store.
//!
//! # Flow
//!
//! ```text
//! create: validate ─► calculate pmax ─► repo.create
//! update: repo.get_by_id ─► validate ─► (pbuf/temp changed? calculate) ─► repo.update
//! delete: repo.get_by_id ─► repo.delete
//! ```
//!
//! # Concurrency
//!
//! The existence check and the write in update/delete are separate round
//! trips with no transaction around them. Concurrent writers to the same
//! well are last-writer-wins.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use super::calculation::{calculate, CalculationError};
use crate::db::{RepositoryError, WellRepository};
use crate::types::{PageRequest, Well, WellDraft, WellId, WellInput, WellSummary};
use crate::validation::{self, ValidationErrors, Validator};

/// Absolute zero in the temperature unit of the well data
pub const ABSOLUTE_ZERO: f64 = -273.15;

#[derive(Debug, Error)]
pub enum WellError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid well id: {0}")]
    InvalidId(WellId),

    #[error("well {0} not found")]
    NotFound(WellId),

    #[error("{operation}: calculation failed: {source}")]
    Calculation {
        operation: &'static str,
        source: CalculationError,
    },

    #[error(
        "{operation}{}: repository error: {source}",
        .id.map(|id| format!(" (well {id})")).unwrap_or_default()
    )]
    Repository {
        operation: &'static str,
        id: Option<WellId>,
        source: RepositoryError,
    },
}

impl WellError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WellError::NotFound(_)
                | WellError::Repository {
                    source: RepositoryError::NotFound,
                    ..
                }
        )
    }

    fn repository(operation: &'static str, id: Option<WellId>) -> impl FnOnce(RepositoryError) -> Self {
        move |source| match (source, id) {
            (RepositoryError::NotFound, Some(id)) => WellError::NotFound(id),
            (source, id) => WellError::Repository { operation, id, source },
        }
    }

    fn calculation(operation: &'static str) -> impl FnOnce(CalculationError) -> Self {
        move |source| WellError::Calculation { operation, source }
    }
}

pub type WellResult<T> = Result<T, WellError>;

/// Well lifecycle service
///
/// Stateless between calls; cheap to share behind an `Arc`.
pub struct WellService {
    repo: Arc<dyn WellRepository>,
}

impl WellService {
    pub fn new(repo: Arc<dyn WellRepository>) -> Self {
        Self { repo }
    }

    /// Validate, derive `pmax`, and persist a new well
    #[instrument(skip_all, fields(layer = "service", name = %input.name))]
    pub async fn create_well(&self, input: WellInput) -> WellResult<Well> {
        validate(&input)?;

        let pmax = calculate(input.params.pbuf, input.params.temp)
            .map_err(WellError::calculation("create_well"))?;

        let draft = WellDraft::from_input(input, pmax);
        let well = self
            .repo
            .create(&draft)
            .await
            .map_err(WellError::repository("create_well", None))?;

        tracing::info!(id = well.id, pmax, "well created");
        Ok(well)
    }

    #[instrument(skip(self), fields(layer = "service"))]
    pub async fn get_well(&self, id: WellId) -> WellResult<Well> {
        ensure_id(id)?;

        self.repo
            .get_by_id(id)
            .await
            .map_err(WellError::repository("get_well", Some(id)))?
            .ok_or(WellError::NotFound(id))
    }

    /// Full replace of an existing well
    ///
    /// `pmax` is recomputed only when `pbuf` or `temp` differ from the stored
    /// record; otherwise the stored value is kept bit-for-bit.
    #[instrument(skip(self, input), fields(layer = "service"))]
    pub async fn update_well(&self, id: WellId, input: WellInput) -> WellResult<Well> {
        ensure_id(id)?;

        let existing = self
            .repo
            .get_by_id(id)
            .await
            .map_err(WellError::repository("update_well", Some(id)))?
            .ok_or(WellError::NotFound(id))?;

        validate(&input)?;

        let inputs_changed =
            input.params.pbuf != existing.params.pbuf || input.params.temp != existing.params.temp;

        let pmax = if inputs_changed {
            let pmax = calculate(input.params.pbuf, input.params.temp)
                .map_err(WellError::calculation("update_well"))?;
            tracing::debug!(old = existing.pmax, new = pmax, "pmax recomputed");
            pmax
        } else {
            existing.pmax
        };

        let draft = WellDraft::from_input(input, pmax);
        let well = self
            .repo
            .update(id, &draft)
            .await
            .map_err(WellError::repository("update_well", Some(id)))?;

        tracing::info!("well updated");
        Ok(well)
    }

    /// Hard delete; confirms existence first so a missing well is reported
    /// as [`WellError::NotFound`]
    #[instrument(skip(self), fields(layer = "service"))]
    pub async fn delete_well(&self, id: WellId) -> WellResult<()> {
        ensure_id(id)?;

        if self
            .repo
            .get_by_id(id)
            .await
            .map_err(WellError::repository("delete_well", Some(id)))?
            .is_none()
        {
            return Err(WellError::NotFound(id));
        }

        self.repo
            .delete(id)
            .await
            .map_err(WellError::repository("delete_well", Some(id)))?;

        tracing::info!("well deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(layer = "service"))]
    pub async fn list_wells(&self, page: PageRequest) -> WellResult<Vec<WellSummary>> {
        self.repo
            .list(page)
            .await
            .map_err(WellError::repository("list_wells", None))
    }
}

fn ensure_id(id: WellId) -> WellResult<()> {
    if id <= 0 {
        return Err(WellError::InvalidId(id));
    }
    Ok(())
}

/// Domain rules shared by create and update; reports every violation
fn validate(input: &WellInput) -> Result<(), ValidationErrors> {
    let mut v = Validator::new();
    let p = &input.params;

    v.check(validation::not_blank(&input.name), "name", "well name cannot be empty");

    for (field, value) in p.named() {
        v.check(value.is_finite(), field, "must be a finite number");
    }

    v.check(p.pbuf > 0.0, "pbuf", "buffer pressure must be positive");
    v.check(p.diameter > 0.0, "diameter", "pipe diameter must be positive");
    v.check(
        p.temp >= ABSOLUTE_ZERO,
        "temp",
        "temperature cannot be below absolute zero",
    );

    v.finish()
}
