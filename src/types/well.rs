//! Well Entity
//!
//! A well record and its physical parameters. Identity, timestamps and the
//! derived maximum pressure are owned by the store and the service; callers
//! only ever supply a [`WellInput`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well identity (generated by the store)
pub type WellId = i64;

/// Status assigned when the caller does not supply one
pub const DEFAULT_STATUS: &str = "active";

/// Known status values
pub const KNOWN_STATUSES: [&str; 3] = ["active", "inactive", "calculating"];

/// Physical measurements of a well
///
/// All values are real numbers in the units used by the field engineers.
/// Missing fields deserialize to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellParameters {
    /// Specific gas gravity
    pub gamma_g: f64,
    /// Reservoir temperature
    pub temp: f64,
    /// Surface temperature
    pub temp_ust: f64,
    pub depth: f64,
    /// Buffer pressure
    pub pbuf: f64,
    /// Tubing pressure
    pub ptb: f64,
    /// Reservoir pressure
    pub ppl: f64,
    /// Bottomhole pressure
    pub pz: f64,
    /// Flow rate
    pub q: f64,
    /// Pipe roughness
    pub roughness: f64,
    /// Pipe diameter
    pub diameter: f64,
    /// Flow-correlation coefficient A
    pub a: f64,
    /// Flow-correlation coefficient B
    pub b: f64,
    /// Viscosity
    pub mu: f64,
    /// Gas factor
    pub wgf: f64,
    /// Fluid density
    pub rog: f64,
    pub hw: f64,
    /// Minimum flow rate
    pub qmin: f64,
}

impl WellParameters {
    /// Every measurement paired with its field name
    pub fn named(&self) -> [(&'static str, f64); 18] {
        [
            ("gamma_g", self.gamma_g),
            ("temp", self.temp),
            ("temp_ust", self.temp_ust),
            ("depth", self.depth),
            ("pbuf", self.pbuf),
            ("ptb", self.ptb),
            ("ppl", self.ppl),
            ("pz", self.pz),
            ("q", self.q),
            ("roughness", self.roughness),
            ("diameter", self.diameter),
            ("a", self.a),
            ("b", self.b),
            ("mu", self.mu),
            ("wgf", self.wgf),
            ("rog", self.rog),
            ("hw", self.hw),
            ("qmin", self.qmin),
        ]
    }
}

/// Caller-supplied payload for create and full-replace update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInput {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub params: WellParameters,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub result: f64,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// A persisted well
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Well {
    pub id: WellId,
    pub name: String,
    pub location: String,
    #[serde(flatten)]
    pub params: WellParameters,
    /// Derived maximum pressure, never caller-supplied
    pub pmax: f64,
    /// Opaque status text
    pub status: String,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A well that has passed validation and carries its derived value, ready to
/// be written. Has no identity or timestamps yet.
#[derive(Debug, Clone, PartialEq)]
pub struct WellDraft {
    pub name: String,
    pub location: String,
    pub params: WellParameters,
    pub pmax: f64,
    pub status: String,
    pub result: f64,
}

impl WellDraft {
    pub fn from_input(input: WellInput, pmax: f64) -> Self {
        Self {
            name: input.name.trim().to_string(),
            location: input.location,
            params: input.params,
            pmax,
            status: input.status,
            result: input.result,
        }
    }
}

/// Narrow projection returned by listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellSummary {
    pub id: WellId,
    pub name: String,
    pub location: String,
    pub pbuf: f64,
    pub status: String,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Well> for WellSummary {
    fn from(well: &Well) -> Self {
        Self {
            id: well.id,
            name: well.name.clone(),
            location: well.location.clone(),
            pbuf: well.params.pbuf,
            status: well.status.clone(),
            result: well.result,
            created_at: well.created_at,
            updated_at: well.updated_at,
        }
    }
}
