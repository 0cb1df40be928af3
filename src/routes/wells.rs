//! Well Endpoints
//!
//! JSON CRUD over the well service. Each handler decodes the request, makes
//! exactly one service call, and lets [`ApiError`] pick the status code.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::extract::ApiJson;
use crate::{
    error::ApiError,
    types::{PageRequest, Well, WellId, WellInput, WellSummary, KNOWN_STATUSES},
    validation::{self, Validator},
    AppState,
};

// ============ Request/Response Types ============

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page size (default 20, max 100)
    pub limit: Option<i64>,
    /// Records to skip (default 0)
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub wells: Vec<WellSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
    pub count: usize,
}

// ============ Handlers ============

/// POST /wells
pub async fn create_well(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<WellInput>,
) -> Result<(StatusCode, Json<Well>), ApiError> {
    check_status(&input)?;

    let well = state.wells.create_well(input).await?;
    Ok((StatusCode::CREATED, Json(well)))
}

/// GET /wells?limit=&offset=
///
/// Newest first, summary fields only
pub async fn list_wells(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let page = PageRequest::new(query.limit, query.offset);
    let wells = state.wells.list_wells(page).await?;

    Ok(Json(ListResponse {
        pagination: Pagination {
            limit: page.limit,
            offset: page.offset,
            count: wells.len(),
        },
        wells,
    }))
}

/// GET /wells/:id
pub async fn get_well(
    State(state): State<AppState>,
    Path(id): Path<WellId>,
) -> Result<Json<Well>, ApiError> {
    Ok(Json(state.wells.get_well(id).await?))
}

/// PUT /wells/:id
///
/// Full replace; `pmax` is recomputed only if `pbuf` or `temp` changed
pub async fn update_well(
    State(state): State<AppState>,
    Path(id): Path<WellId>,
    ApiJson(input): ApiJson<WellInput>,
) -> Result<Json<Well>, ApiError> {
    check_status(&input)?;

    Ok(Json(state.wells.update_well(id, input).await?))
}

/// DELETE /wells/:id
pub async fn delete_well(
    State(state): State<AppState>,
    Path(id): Path<WellId>,
) -> Result<StatusCode, ApiError> {
    state.wells.delete_well(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============ Helpers ============

/// Status is opaque to the service; the transport only restricts it to the
/// known values.
fn check_status(input: &WellInput) -> Result<(), ApiError> {
    let mut v = Validator::new();
    v.check(
        validation::is_in(&input.status.as_str(), &KNOWN_STATUSES),
        "status",
        format!("status must be one of {}", KNOWN_STATUSES.join(", ")),
    );
    v.finish().map_err(ApiError::ValidationError)
}
