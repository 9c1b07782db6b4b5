//! # Architect Recommendation API

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use pfa_core::FundParameters;
use pfa_scoring::{recommend, Recommendation, DEFAULT_RECOMMENDATION_LIMIT};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Largest accepted `limit`.
pub const MAX_RECOMMENDATION_LIMIT: usize = 32;

/// Recommendation request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameters: FundParameters,
    /// Ranked entries to return, recommendation included. Defaults to 3.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Validate for RecommendRequest {
    fn validate(&self) -> Result<(), String> {
        match self.limit {
            Some(n) if n == 0 || n > MAX_RECOMMENDATION_LIMIT => Err(format!(
                "limit must be between 1 and {MAX_RECOMMENDATION_LIMIT}"
            )),
            _ => Ok(()),
        }
    }
}

/// Build the recommendations router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/recommendations", post(create_recommendation))
}

/// POST /v1/recommendations — Recommend a domicile for a fund.
#[utoipa::path(
    post,
    path = "/v1/recommendations",
    request_body = RecommendRequest,
    responses(
        (status = 200, description = "Recommended jurisdiction and alternatives", body = Recommendation),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "recommendations"
)]
pub async fn create_recommendation(
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Recommendation>, AppError> {
    let req = extract_validated_json(body)?;
    let limit = req.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    Ok(Json(recommend(&req.parameters, limit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_bounds() {
        let mut req: RecommendRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        req.limit = Some(0);
        assert!(req.validate().is_err());
        req.limit = Some(MAX_RECOMMENDATION_LIMIT);
        assert!(req.validate().is_ok());
        req.limit = Some(MAX_RECOMMENDATION_LIMIT + 1);
        assert!(req.validate().is_err());
    }
}
