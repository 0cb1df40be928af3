//! PostgreSQL Well Repository
//!
//! All statements are parameterized. Each call is bounded by
//! `statement_timeout`; expiry is reported as [`RepositoryError::Timeout`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{WellRow, WellSummaryRow};
use super::repository::{RepositoryError, RepositoryResult, WellRepository};
use crate::types::{PageRequest, Well, WellDraft, WellId, WellSummary};

const WELL_COLUMNS: &str = r#"
    id, name, location, gammag, temp, tempust, depth, pbuf, ptb, ppl, pz, q,
    roughness, diameter, a, b, mu, wgf, rog, hw, qmin, pmax, status, result,
    created_at, updated_at
"#;

pub struct PgWellRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgWellRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> RepositoryResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.statement_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                tracing::error!(layer = "repository", operation, error = %err, "query failed");
                Err(RepositoryError::Database(err))
            }
            Err(_) => {
                tracing::error!(
                    layer = "repository",
                    operation,
                    timeout_ms = self.statement_timeout.as_millis() as u64,
                    "query timed out"
                );
                Err(RepositoryError::Timeout(self.statement_timeout))
            }
        }
    }
}

/// Bind the 22 writable columns of a draft in table order
macro_rules! bind_draft {
    ($query:expr, $draft:expr) => {{
        let d = $draft;
        let p = &d.params;
        $query
            .bind(&d.name)
            .bind(&d.location)
            .bind(p.gamma_g)
            .bind(p.temp)
            .bind(p.temp_ust)
            .bind(p.depth)
            .bind(p.pbuf)
            .bind(p.ptb)
            .bind(p.ppl)
            .bind(p.pz)
            .bind(p.q)
            .bind(p.roughness)
            .bind(p.diameter)
            .bind(p.a)
            .bind(p.b)
            .bind(p.mu)
            .bind(p.wgf)
            .bind(p.rog)
            .bind(p.hw)
            .bind(p.qmin)
            .bind(d.pmax)
            .bind(&d.status)
            .bind(d.result)
    }};
}

#[async_trait]
impl WellRepository for PgWellRepository {
    async fn create(&self, draft: &WellDraft) -> RepositoryResult<Well> {
        let sql = format!(
            r#"
            INSERT INTO wells (
                name, location, gammag, temp, tempust, depth, pbuf, ptb, ppl, pz, q,
                roughness, diameter, a, b, mu, wgf, rog, hw, qmin, pmax, status, result
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23)
            RETURNING {WELL_COLUMNS}
            "#
        );

        let query = bind_draft!(sqlx::query_as::<_, WellRow>(&sql), draft);
        let row = self.bounded("create", query.fetch_one(&self.pool)).await?;

        tracing::debug!(layer = "repository", id = row.id, "well inserted");
        Ok(row.into())
    }

    async fn get_by_id(&self, id: WellId) -> RepositoryResult<Option<Well>> {
        let sql = format!("SELECT {WELL_COLUMNS} FROM wells WHERE id = $1");

        let query = sqlx::query_as::<_, WellRow>(&sql).bind(id);
        let row = self.bounded("get_by_id", query.fetch_optional(&self.pool)).await?;

        Ok(row.map(Well::from))
    }

    async fn update(&self, id: WellId, draft: &WellDraft) -> RepositoryResult<Well> {
        let sql = format!(
            r#"
            UPDATE wells
            SET name = $1, location = $2, gammag = $3, temp = $4, tempust = $5,
                depth = $6, pbuf = $7, ptb = $8, ppl = $9, pz = $10, q = $11,
                roughness = $12, diameter = $13, a = $14, b = $15, mu = $16,
                wgf = $17, rog = $18, hw = $19, qmin = $20, pmax = $21,
                status = $22, result = $23, updated_at = NOW()
            WHERE id = $24
            RETURNING {WELL_COLUMNS}
            "#
        );

        let query = bind_draft!(sqlx::query_as::<_, WellRow>(&sql), draft).bind(id);

        // RETURNING yields no row when nothing matched
        match self.bounded("update", query.fetch_optional(&self.pool)).await? {
            Some(row) => Ok(row.into()),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: WellId) -> RepositoryResult<()> {
        let query = sqlx::query("DELETE FROM wells WHERE id = $1").bind(id);
        let result = self.bounded("delete", query.execute(&self.pool)).await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> RepositoryResult<Vec<WellSummary>> {
        let query = sqlx::query_as::<_, WellSummaryRow>(
            r#"
            SELECT id, name, location, pbuf, status, result, created_at, updated_at
            FROM wells
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset);

        let rows = self.bounded("list", query.fetch_all(&self.pool)).await?;
        Ok(rows.into_iter().map(WellSummary::from).collect())
    }
}
