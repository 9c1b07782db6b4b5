//! # OpenAPI Document Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Private Fund Architect API",
        version = "0.1.0",
        description = "Jurisdiction scoring and comparison for private fund formation: reference data, scores, ranked comparisons, recommendations, saved comparisons, and share links.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Jurisdictions
        crate::routes::jurisdictions::list_jurisdictions,
        crate::routes::jurisdictions::get_jurisdiction,
        crate::routes::jurisdictions::score_jurisdiction,
        // Comparisons
        crate::routes::comparisons::create_comparison,
        // Recommendations
        crate::routes::recommendations::create_recommendation,
        // Saved comparisons
        crate::routes::saved::save_comparison,
        crate::routes::saved::list_saved_comparisons,
        crate::routes::saved::get_saved_comparison,
        crate::routes::saved::delete_saved_comparison,
        // Shares
        crate::routes::shares::create_share,
        crate::routes::shares::get_share,
    ),
    components(schemas(
        // Engine types
        pfa_scoring::JurisdictionReference,
        pfa_scoring::StrategyOffsets,
        pfa_scoring::Span,
        pfa_scoring::ScoreBreakdown,
        pfa_scoring::ScoreResult,
        pfa_scoring::ComparisonResult,
        pfa_scoring::RankedRow,
        pfa_scoring::RankedProfile,
        pfa_scoring::Recommendation,
        pfa_scoring::SharePayload,
        pfa_scoring::ComparisonSnapshot,
        pfa_scoring::ParametersSnapshot,
        // State record types
        crate::state::SavedComparison,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // DTOs
        crate::routes::jurisdictions::ScoreResponse,
        crate::routes::comparisons::CompareRequest,
        crate::routes::comparisons::ComparisonResponse,
        crate::routes::recommendations::RecommendRequest,
        crate::routes::saved::SaveComparisonRequest,
        crate::routes::shares::CreateShareRequest,
        crate::routes::shares::ShareCreatedResponse,
        crate::routes::shares::ShareResponse,
    )),
    tags(
        (name = "jurisdictions", description = "Jurisdiction reference data and scoring"),
        (name = "comparisons", description = "Ranked jurisdiction comparisons"),
        (name = "recommendations", description = "Architect recommendations"),
        (name = "saved_comparisons", description = "Saved comparisons"),
        (name = "shares", description = "Share links"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI JSON at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/v1/jurisdictions",
            "/v1/jurisdictions/{id}",
            "/v1/jurisdictions/{id}/score",
            "/v1/comparisons",
            "/v1/recommendations",
            "/v1/comparisons/saved",
            "/v1/comparisons/saved/{id}",
            "/v1/shares",
            "/v1/shares/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
