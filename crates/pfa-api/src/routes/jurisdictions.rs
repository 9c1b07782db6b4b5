//! # Jurisdiction Reference & Scoring API
//!
//! Read-only access to the reference table and single-jurisdiction scoring.
//! Scoring an id that has no reference entry is not an error: it scores
//! from the default base and the breakdown says so.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use pfa_core::{FundParameters, JurisdictionId};
use pfa_scoring::{reference, score_breakdown, JurisdictionReference, ScoreBreakdown};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::state::AppState;

/// Fund description supplied as query parameters.
///
/// Missing numbers default to zero; an unrecognized strategy is ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScoreQuery {
    /// Fund size in USD millions.
    #[serde(rename = "fundSizeUSDMillions")]
    pub fund_size_usd_millions: Option<f64>,
    /// Number of limited partners.
    /// Fractions are floored; out-of-range values saturate.
    #[serde(rename = "limitedPartnerCount")]
    pub limited_partner_count: Option<f64>,
    /// One of private-equity, real-estate, venture-capital, private-credit.
    pub strategy: Option<String>,
}

impl ScoreQuery {
    fn into_parameters(self) -> FundParameters {
        FundParameters::from_raw(
            self.fund_size_usd_millions.unwrap_or(0.0),
            self.limited_partner_count.unwrap_or(0.0),
            self.strategy.as_deref(),
        )
    }
}

/// Score of one jurisdiction with the terms behind it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[schema(value_type = String)]
    pub jurisdiction_id: JurisdictionId,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    #[schema(value_type = Object)]
    pub parameters: FundParameters,
}

/// Build the jurisdictions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/jurisdictions", get(list_jurisdictions))
        .route("/v1/jurisdictions/{id}", get(get_jurisdiction))
        .route("/v1/jurisdictions/{id}/score", get(score_jurisdiction))
}

/// GET /v1/jurisdictions — The full reference table.
#[utoipa::path(
    get,
    path = "/v1/jurisdictions",
    responses(
        (status = 200, description = "Reference table, base score descending", body = Vec<JurisdictionReference>),
    ),
    tag = "jurisdictions"
)]
pub async fn list_jurisdictions() -> Json<Vec<JurisdictionReference>> {
    Json(reference::all().to_vec())
}

/// GET /v1/jurisdictions/{id} — One reference entry.
#[utoipa::path(
    get,
    path = "/v1/jurisdictions/{id}",
    params(("id" = String, Path, description = "Jurisdiction ID, e.g. cayman-islands")),
    responses(
        (status = 200, description = "Reference entry", body = JurisdictionReference),
        (status = 404, description = "No reference entry for this ID", body = crate::error::ErrorBody),
    ),
    tag = "jurisdictions"
)]
pub async fn get_jurisdiction(
    Path(id): Path<String>,
) -> Result<Json<JurisdictionReference>, AppError> {
    reference::lookup_str(id.trim())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("jurisdiction {id} not found")))
}

/// GET /v1/jurisdictions/{id}/score — Score one jurisdiction for a fund.
#[utoipa::path(
    get,
    path = "/v1/jurisdictions/{id}/score",
    params(
        ("id" = String, Path, description = "Jurisdiction ID; unknown IDs score from the default base"),
        ScoreQuery,
    ),
    responses(
        (status = 200, description = "Score with breakdown", body = ScoreResponse),
        (status = 422, description = "Malformed query string", body = crate::error::ErrorBody),
    ),
    tag = "jurisdictions"
)]
pub async fn score_jurisdiction(
    Path(id): Path<String>,
    query: Result<Query<ScoreQuery>, QueryRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let jurisdiction_id = JurisdictionId::new(id)?;
    let parameters = extract_query(query)?.into_parameters();
    let breakdown = score_breakdown(&jurisdiction_id, &parameters);

    Ok(Json(ScoreResponse {
        jurisdiction_id,
        score: breakdown.score,
        breakdown,
        parameters,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfa_core::Strategy;

    #[test]
    fn empty_query_is_default_fund() {
        let p = ScoreQuery::default().into_parameters();
        assert_eq!(p, FundParameters::default());
    }

    #[test]
    fn unknown_strategy_is_ignored() {
        let q = ScoreQuery {
            strategy: Some("hedge-fund".to_string()),
            ..ScoreQuery::default()
        };
        assert_eq!(q.into_parameters().strategy(), None);
    }

    #[test]
    fn strategy_parse_is_lenient() {
        let q = ScoreQuery {
            strategy: Some("Venture_Capital".to_string()),
            ..ScoreQuery::default()
        };
        assert_eq!(q.into_parameters().strategy(), Some(Strategy::VentureCapital));
    }

    #[test]
    fn fractional_lp_count_is_floored() {
        let q = ScoreQuery {
            limited_partner_count: Some(40.5),
            ..ScoreQuery::default()
        };
        assert_eq!(q.into_parameters().limited_partner_count(), 40);
    }
}
