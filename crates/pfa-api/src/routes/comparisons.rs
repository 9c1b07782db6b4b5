//! # Comparison API
//!
//! Scores a set of jurisdictions for one fund and returns them ranked.
//! Ordering, tie-breaks and de-duplication are the engine's; this module
//! only validates the request shape.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use pfa_core::{FundParameters, JurisdictionId};
use pfa_scoring::{compare, ComparisonResult, RankedRow};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Most jurisdiction ids accepted in one request.
pub const MAX_JURISDICTIONS_PER_REQUEST: usize = 32;

/// Check a raw id list: bounded length, no blank entries.
pub(crate) fn validate_jurisdiction_ids(ids: &[String]) -> Result<(), String> {
    if ids.len() > MAX_JURISDICTIONS_PER_REQUEST {
        return Err(format!(
            "jurisdictionIds must not exceed {MAX_JURISDICTIONS_PER_REQUEST} entries"
        ));
    }
    if let Some(pos) = ids.iter().position(|id| id.trim().is_empty()) {
        return Err(format!("jurisdictionIds[{pos}] must not be empty"));
    }
    Ok(())
}

/// Convert validated raw ids into domain ids.
pub(crate) fn parse_jurisdiction_ids(ids: &[String]) -> Result<Vec<JurisdictionId>, AppError> {
    ids.iter()
        .map(|id| JurisdictionId::new(id.as_str()).map_err(AppError::from))
        .collect()
}

/// Compare request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    /// Jurisdictions to rank. Duplicates collapse; an empty list yields an
    /// empty result.
    pub jurisdiction_ids: Vec<String>,
    /// Fund description. Missing fields default to zero / no strategy.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameters: FundParameters,
}

impl Validate for CompareRequest {
    fn validate(&self) -> Result<(), String> {
        validate_jurisdiction_ids(&self.jurisdiction_ids)
    }
}

/// Ranked comparison plus table rows with rank and leader delta.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    #[serde(flatten)]
    pub result: ComparisonResult,
    pub rows: Vec<RankedRow>,
}

impl From<ComparisonResult> for ComparisonResponse {
    fn from(result: ComparisonResult) -> Self {
        let rows = result.ranked_rows();
        Self { result, rows }
    }
}

/// Build the comparisons router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/comparisons", post(create_comparison))
}

/// POST /v1/comparisons — Rank jurisdictions for a fund.
#[utoipa::path(
    post,
    path = "/v1/comparisons",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Ranked comparison", body = ComparisonResponse),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "comparisons"
)]
pub async fn create_comparison(
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let ids = parse_jurisdiction_ids(&req.jurisdiction_ids)?;
    let result = compare(ids, &req.parameters);
    Ok(Json(result.into()))
}
