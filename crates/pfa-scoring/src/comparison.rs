//! # Comparison Assembler
//!
//! Scores a set of jurisdictions for one fund and orders the results:
//! score descending, then jurisdiction id ascending so that ties rank the
//! same way on every run. Duplicate ids collapse to one entry.
//!
//! The assembler has no side effects and reads no shared mutable state.
//! Results are returned by value and owned by the caller.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, SubsecRound, Utc};
use pfa_core::{FundParameters, JurisdictionId};
use serde::{Deserialize, Serialize};

use crate::scoring::score;

/// One jurisdiction's score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub jurisdiction_id: JurisdictionId,
    pub score: u8,
}

impl ScoreResult {
    /// Ranking order: higher score first, then lower id first.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.jurisdiction_id.cmp(&other.jurisdiction_id))
    }
}

/// An ordered comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub ordered_scores: Vec<ScoreResult>,
    pub generated_at: DateTime<Utc>,
}

/// A comparison entry with its position, as consumed by table renderers
/// and export generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RankedRow {
    /// 1-based position in the ordered comparison.
    pub rank: usize,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub jurisdiction_id: JurisdictionId,
    pub score: u8,
    /// `score - leader.score`; zero for the leader, never positive.
    pub delta_from_leader: i16,
}

impl ComparisonResult {
    /// The top-ranked entry, if any.
    pub fn leader(&self) -> Option<&ScoreResult> {
        self.ordered_scores.first()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered_scores.len()
    }

    /// Whether `ordered_scores` is strictly in ranking order, which also
    /// rules out duplicate ids.
    pub fn is_ordered(&self) -> bool {
        self.ordered_scores
            .windows(2)
            .all(|w| w[0].rank_cmp(&w[1]) == Ordering::Less)
    }

    /// Rank and leader delta for each entry.
    pub fn ranked_rows(&self) -> Vec<RankedRow> {
        let leader = self.leader().map_or(0, |l| i16::from(l.score));
        self.ordered_scores
            .iter()
            .enumerate()
            .map(|(i, s)| RankedRow {
                rank: i + 1,
                jurisdiction_id: s.jurisdiction_id.clone(),
                score: s.score,
                delta_from_leader: i16::from(s.score) - leader,
            })
            .collect()
    }
}

/// Compare jurisdictions for a fund, stamped with the current time.
pub fn compare<I>(jurisdiction_ids: I, params: &FundParameters) -> ComparisonResult
where
    I: IntoIterator<Item = JurisdictionId>,
{
    compare_at(jurisdiction_ids, params, Utc::now().trunc_subsecs(0))
}

/// Compare jurisdictions for a fund with an explicit timestamp.
///
/// Everything but `generated_at` is a function of the inputs alone.
pub fn compare_at<I>(
    jurisdiction_ids: I,
    params: &FundParameters,
    generated_at: DateTime<Utc>,
) -> ComparisonResult
where
    I: IntoIterator<Item = JurisdictionId>,
{
    let unique: BTreeSet<JurisdictionId> = jurisdiction_ids.into_iter().collect();
    let mut ordered_scores: Vec<ScoreResult> = unique
        .into_iter()
        .map(|jurisdiction_id| {
            let score = score(&jurisdiction_id, params);
            ScoreResult {
                jurisdiction_id,
                score,
            }
        })
        .collect();
    ordered_scores.sort_by(ScoreResult::rank_cmp);

    tracing::debug!(
        jurisdictions = ordered_scores.len(),
        leader = ordered_scores.first().map(|s| s.jurisdiction_id.as_str()),
        "comparison assembled"
    );

    ComparisonResult {
        ordered_scores,
        generated_at,
    }
}
