//! # Architect Recommendation
//!
//! Picks a domicile for a fund: every reference jurisdiction that lists the
//! fund's strategy as suitable is ranked through the comparison assembler.
//! The leader becomes the recommendation and the runners-up the
//! alternatives. With no recognizable strategy, the whole table competes.

use chrono::{DateTime, SubsecRound, Utc};
use pfa_core::FundParameters;
use serde::{Deserialize, Serialize};

use crate::comparison::{compare_at, ScoreResult};
use crate::reference::{self, JurisdictionReference};

/// Default number of ranked entries returned (recommendation included).
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// A scored jurisdiction together with its reference profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RankedProfile {
    pub rank: usize,
    #[serde(flatten)]
    pub result: ScoreResult,
    pub profile: JurisdictionReference,
}

/// Outcome of an architect run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub parameters: FundParameters,
    pub recommended: Option<RankedProfile>,
    pub alternatives: Vec<RankedProfile>,
    pub generated_at: DateTime<Utc>,
}

/// Recommend a jurisdiction, stamped with the current time.
pub fn recommend(params: &FundParameters, limit: usize) -> Recommendation {
    recommend_at(params, limit, Utc::now().trunc_subsecs(0))
}

/// Recommend a jurisdiction with an explicit timestamp.
///
/// `limit` counts the recommendation itself and is raised to at least 1.
pub fn recommend_at(
    params: &FundParameters,
    limit: usize,
    generated_at: DateTime<Utc>,
) -> Recommendation {
    let limit = limit.max(1);
    let candidates = reference::all()
        .iter()
        .filter(|r| params.strategy().map_or(true, |s| r.is_suitable_for(s)))
        .map(|r| r.id.clone());

    let comparison = compare_at(candidates, params, generated_at);

    let mut ranked = comparison
        .ordered_scores
        .into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, result)| {
            reference::lookup(&result.jurisdiction_id).map(|profile| RankedProfile {
                rank: i + 1,
                result,
                profile: profile.clone(),
            })
        });

    let recommended = ranked.next();
    let alternatives: Vec<RankedProfile> = ranked.collect();

    tracing::debug!(
        strategy = ?params.strategy(),
        recommended = recommended.as_ref().map(|r| r.result.jurisdiction_id.as_str()),
        alternatives = alternatives.len(),
        "architect recommendation computed"
    );

    Recommendation {
        parameters: params.clone(),
        recommended,
        alternatives,
        generated_at,
    }
}
