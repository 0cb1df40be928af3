//! Database Models
//!
//! Row shapes of the `wells` table. Column names follow the field engineers'
//! abbreviations; conversion into domain types happens here so the rest of
//! the crate never sees a raw row.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::{Well, WellParameters, WellSummary};

/// Full `wells` row
#[derive(Debug, Clone, FromRow)]
pub struct WellRow {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub gammag: f64,
    pub temp: f64,
    pub tempust: f64,
    pub depth: f64,
    pub pbuf: f64,
    pub ptb: f64,
    pub ppl: f64,
    pub pz: f64,
    pub q: f64,
    pub roughness: f64,
    pub diameter: f64,
    pub a: f64,
    pub b: f64,
    pub mu: f64,
    pub wgf: f64,
    pub rog: f64,
    pub hw: f64,
    pub qmin: f64,
    pub pmax: f64,
    pub status: String,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WellRow> for Well {
    fn from(row: WellRow) -> Self {
        Well {
            id: row.id,
            name: row.name,
            location: row.location,
            params: WellParameters {
                gamma_g: row.gammag,
                temp: row.temp,
                temp_ust: row.tempust,
                depth: row.depth,
                pbuf: row.pbuf,
                ptb: row.ptb,
                ppl: row.ppl,
                pz: row.pz,
                q: row.q,
                roughness: row.roughness,
                diameter: row.diameter,
                a: row.a,
                b: row.b,
                mu: row.mu,
                wgf: row.wgf,
                rog: row.rog,
                hw: row.hw,
                qmin: row.qmin,
            },
            pmax: row.pmax,
            status: row.status,
            result: row.result,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Listing projection
#[derive(Debug, Clone, FromRow)]
pub struct WellSummaryRow {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub pbuf: f64,
    pub status: String,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WellSummaryRow> for WellSummary {
    fn from(row: WellSummaryRow) -> Self {
        WellSummary {
            id: row.id,
            name: row.name,
            location: row.location,
            pbuf: row.pbuf,
            status: row.status,
            result: row.result,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
