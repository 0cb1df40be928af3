//! Repository Contract
//!
//! The service depends only on [`WellRepository`]; the PostgreSQL adapter
//! lives in `well_repository.rs` and an in-memory implementation backs the
//! service tests.
//!
//! ```text
//!   WellService ──► dyn WellRepository ──┬─► PgWellRepository (PgPool)
//!                                        └─► InMemoryWellRepository (tests)
//! ```
//!
//! "No such row" is a variant, not an error message: `get_by_id` returns
//! `Ok(None)`, while `update`/`delete` return [`RepositoryError::NotFound`]
//! when zero rows were affected.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{PageRequest, Well, WellDraft, WellId, WellSummary};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("well not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store round trip timed out after {0:?}")]
    Timeout(std::time::Duration),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Well persistence interface
#[async_trait]
pub trait WellRepository: Send + Sync {
    /// Insert a new record in one statement; the store assigns identity and
    /// both timestamps.
    async fn create(&self, draft: &WellDraft) -> RepositoryResult<Well>;

    async fn get_by_id(&self, id: WellId) -> RepositoryResult<Option<Well>>;

    /// Full-record replace by identity; refreshes `updated_at`
    async fn update(&self, id: WellId, draft: &WellDraft) -> RepositoryResult<Well>;

    /// Hard delete
    async fn delete(&self, id: WellId) -> RepositoryResult<()>;

    /// Newest first by `created_at`
    async fn list(&self, page: PageRequest) -> RepositoryResult<Vec<WellSummary>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    use chrono::{Duration, TimeZone, Utc};

    /// In-memory store with a deterministic clock
    ///
    /// Each write advances the clock by one second so ordering by
    /// `created_at` is well defined.
    pub struct InMemoryWellRepository {
        state: RwLock<State>,
        writes: AtomicUsize,
    }

    struct State {
        rows: BTreeMap<WellId, Well>,
        next_id: WellId,
        ticks: i64,
    }

    impl InMemoryWellRepository {
        pub fn new() -> Self {
            Self {
                state: RwLock::new(State {
                    rows: BTreeMap::new(),
                    next_id: 1,
                    ticks: 0,
                }),
                writes: AtomicUsize::new(0),
            }
        }

        /// Successful create/update/delete calls so far
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        pub fn len(&self) -> usize {
            self.state.read().unwrap().rows.len()
        }
    }

    impl State {
        fn tick(&mut self) -> chrono::DateTime<Utc> {
            self.ticks += 1;
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(self.ticks)
        }
    }

    fn apply(well: &mut Well, draft: &WellDraft) {
        well.name = draft.name.clone();
        well.location = draft.location.clone();
        well.params = draft.params;
        well.pmax = draft.pmax;
        well.status = draft.status.clone();
        well.result = draft.result;
    }

    #[async_trait]
    impl WellRepository for InMemoryWellRepository {
        async fn create(&self, draft: &WellDraft) -> RepositoryResult<Well> {
            let mut state = self.state.write().unwrap();
            let now = state.tick();
            let id = state.next_id;
            state.next_id += 1;

            let well = Well {
                id,
                name: draft.name.clone(),
                location: draft.location.clone(),
                params: draft.params,
                pmax: draft.pmax,
                status: draft.status.clone(),
                result: draft.result,
                created_at: now,
                updated_at: now,
            };
            state.rows.insert(id, well.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(well)
        }

        async fn get_by_id(&self, id: WellId) -> RepositoryResult<Option<Well>> {
            Ok(self.state.read().unwrap().rows.get(&id).cloned())
        }

        async fn update(&self, id: WellId, draft: &WellDraft) -> RepositoryResult<Well> {
            let mut state = self.state.write().unwrap();
            let now = state.tick();
            let well = state.rows.get_mut(&id).ok_or(RepositoryError::NotFound)?;
            apply(well, draft);
            well.updated_at = now;
            let updated = well.clone();
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(updated)
        }

        async fn delete(&self, id: WellId) -> RepositoryResult<()> {
            let mut state = self.state.write().unwrap();
            state.rows.remove(&id).ok_or(RepositoryError::NotFound)?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn list(&self, page: PageRequest) -> RepositoryResult<Vec<WellSummary>> {
            let state = self.state.read().unwrap();
            let mut rows: Vec<&Well> = state.rows.values().collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

            Ok(rows
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .map(WellSummary::from)
                .collect())
        }
    }
}
