//! # Saved Comparisons API
//!
//! Named comparisons kept for later. The ranking is computed server-side at
//! save time from the submitted ids and parameters; clients cannot store a
//! result the engine did not produce.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SubsecRound, Utc};
use pfa_core::FundParameters;
use pfa_scoring::compare_at;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::comparisons::{parse_jurisdiction_ids, validate_jurisdiction_ids};
use crate::state::{AppState, SavedComparison};

/// Longest accepted comparison name, in characters.
pub const MAX_NAME_CHARS: usize = 200;

/// Save-comparison request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveComparisonRequest {
    pub name: String,
    pub jurisdiction_ids: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameters: FundParameters,
}

impl Validate for SaveComparisonRequest {
    fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(format!("name must not exceed {MAX_NAME_CHARS} characters"));
        }
        if self.jurisdiction_ids.is_empty() {
            return Err("jurisdictionIds must not be empty".to_string());
        }
        validate_jurisdiction_ids(&self.jurisdiction_ids)
    }
}

/// Build the saved-comparisons router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/comparisons/saved",
            get(list_saved_comparisons).post(save_comparison),
        )
        .route(
            "/v1/comparisons/saved/{id}",
            get(get_saved_comparison).delete(delete_saved_comparison),
        )
}

/// POST /v1/comparisons/saved — Compute and store a named comparison.
#[utoipa::path(
    post,
    path = "/v1/comparisons/saved",
    request_body = SaveComparisonRequest,
    responses(
        (status = 201, description = "Comparison saved", body = SavedComparison),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "saved_comparisons"
)]
pub async fn save_comparison(
    State(state): State<AppState>,
    body: Result<Json<SaveComparisonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedComparison>), AppError> {
    let req = extract_validated_json(body)?;
    let jurisdiction_ids = parse_jurisdiction_ids(&req.jurisdiction_ids)?;
    let now = Utc::now().trunc_subsecs(0);

    let record = SavedComparison {
        id: Uuid::new_v4(),
        name: req.name.trim().to_string(),
        result: compare_at(jurisdiction_ids.iter().cloned(), &req.parameters, now),
        jurisdiction_ids,
        parameters: req.parameters,
        created_at: now,
    };

    state.saved_comparisons.insert(record.id, record.clone());

    // Write-through. On failure the in-memory copy is rolled back so the
    // client never sees a comparison that would vanish on restart.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::saved_comparisons::insert(pool, &record).await {
            state.saved_comparisons.remove(&record.id);
            tracing::error!(saved_comparison_id = %record.id, error = %e, "failed to persist saved comparison");
            return Err(AppError::Internal(
                "saved comparison could not be persisted".to_string(),
            ));
        }
    }

    tracing::info!(saved_comparison_id = %record.id, jurisdictions = record.jurisdiction_ids.len(), "comparison saved");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/comparisons/saved — List saved comparisons, newest first.
#[utoipa::path(
    get,
    path = "/v1/comparisons/saved",
    responses(
        (status = 200, description = "Saved comparisons, newest first", body = Vec<SavedComparison>),
    ),
    tag = "saved_comparisons"
)]
pub async fn list_saved_comparisons(State(state): State<AppState>) -> Json<Vec<SavedComparison>> {
    let mut records = state.saved_comparisons.list();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    Json(records)
}

/// GET /v1/comparisons/saved/{id} — Fetch one saved comparison.
#[utoipa::path(
    get,
    path = "/v1/comparisons/saved/{id}",
    params(("id" = Uuid, Path, description = "Saved comparison ID")),
    responses(
        (status = 200, description = "Saved comparison", body = SavedComparison),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "saved_comparisons"
)]
pub async fn get_saved_comparison(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedComparison>, AppError> {
    state
        .saved_comparisons
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("saved comparison {id} not found")))
}

/// DELETE /v1/comparisons/saved/{id} — Remove a saved comparison.
#[utoipa::path(
    delete,
    path = "/v1/comparisons/saved/{id}",
    params(("id" = Uuid, Path, description = "Saved comparison ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "saved_comparisons"
)]
pub async fn delete_saved_comparison(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.saved_comparisons.contains(&id) {
        return Err(AppError::NotFound(format!("saved comparison {id} not found")));
    }

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::saved_comparisons::delete(pool, id).await {
            tracing::error!(saved_comparison_id = %id, error = %e, "failed to delete saved comparison");
            return Err(AppError::Internal(
                "saved comparison could not be deleted".to_string(),
            ));
        }
    }

    // A concurrent delete may have won the race; either way it is gone.
    state.saved_comparisons.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(name: &str, ids: &[&str]) -> SaveComparisonRequest {
        SaveComparisonRequest {
            name: name.to_string(),
            jurisdiction_ids: ids.iter().map(|s| s.to_string()).collect(),
            parameters: FundParameters::default(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(req("Fund II", &["bvi"]).validate().is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        assert!(req("   ", &["bvi"]).validate().is_err());
    }

    #[test]
    fn long_name_rejected() {
        let name = "n".repeat(MAX_NAME_CHARS + 1);
        assert!(req(&name, &["bvi"]).validate().is_err());
    }

    #[test]
    fn empty_id_list_rejected() {
        assert!(req("Fund II", &[]).validate().is_err());
    }

    #[test]
    fn blank_id_rejected() {
        assert!(req("Fund II", &["bvi", ""]).validate().is_err());
    }
}
