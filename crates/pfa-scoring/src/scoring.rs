//! # Scoring Function
//!
//! Maps a jurisdiction and a fund description to a suitability score:
//!
//! ```text
//! base    = reference.base_score, or 75 for an unknown jurisdiction
//! offset  = reference.strategy_offsets[strategy], or 0
//! scale   = 2 if fund size >= 250 (USD millions) else 0
//! complex = 2 if LP count >= 30 else 0
//! score   = clamp(base + offset - scale - complex, 40, 100)
//! ```
//!
//! Pure and deterministic. There are no error conditions: unknown
//! jurisdictions and strategies degrade to defaults.

use pfa_core::{FundParameters, JurisdictionId};
use serde::{Deserialize, Serialize};

use crate::reference;

/// Base score for a jurisdiction that is not in the reference table.
pub const DEFAULT_BASE_SCORE: u8 = 75;

/// Lowest score the function can return.
pub const SCORE_FLOOR: u8 = 40;

/// Highest score the function can return.
pub const SCORE_CEILING: u8 = 100;

/// Deduction applied when the fund crosses the size threshold.
pub const SCALE_PENALTY: u8 = 2;

/// Deduction applied when the LP base crosses the complexity threshold.
pub const COMPLEXITY_PENALTY: u8 = 2;

/// The individual terms behind a score, for explanation surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Whether the jurisdiction was found in the reference table.
    pub known_jurisdiction: bool,
    pub base_score: u8,
    pub strategy_offset: i8,
    pub scale_penalty: u8,
    pub complexity_penalty: u8,
    /// `base + offset - penalties` before clamping.
    pub unclamped: i16,
    /// Final score in `[SCORE_FLOOR, SCORE_CEILING]`.
    pub score: u8,
}

/// Score a jurisdiction for the given fund.
pub fn score(jurisdiction_id: &JurisdictionId, params: &FundParameters) -> u8 {
    score_breakdown(jurisdiction_id, params).score
}

/// Score a jurisdiction and return every term that went into it.
pub fn score_breakdown(jurisdiction_id: &JurisdictionId, params: &FundParameters) -> ScoreBreakdown {
    let reference = reference::lookup(jurisdiction_id);

    let base_score = reference.map_or(DEFAULT_BASE_SCORE, |r| r.base_score);
    let strategy_offset = reference.map_or(0, |r| r.strategy_offsets.get(params.strategy()));
    let scale_penalty = if params.is_large_scale() { SCALE_PENALTY } else { 0 };
    let complexity_penalty = if params.is_complex() {
        COMPLEXITY_PENALTY
    } else {
        0
    };

    let unclamped = i16::from(base_score) + i16::from(strategy_offset)
        - i16::from(scale_penalty)
        - i16::from(complexity_penalty);
    let clamped = unclamped.clamp(i16::from(SCORE_FLOOR), i16::from(SCORE_CEILING));
    // In range by construction; the fallback is unreachable.
    let score = u8::try_from(clamped).unwrap_or(SCORE_FLOOR);

    ScoreBreakdown {
        known_jurisdiction: reference.is_some(),
        base_score,
        strategy_offset,
        scale_penalty,
        complexity_penalty,
        unclamped,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfa_core::Strategy;

    fn jid(s: &str) -> JurisdictionId {
        JurisdictionId::new(s).unwrap()
    }

    #[test]
    fn cayman_private_equity_no_adjustments() {
        let p = FundParameters::new(100.0, 15, Some(Strategy::PrivateEquity));
        assert_eq!(score(&jid("cayman-islands"), &p), 89);
    }

    #[test]
    fn bvi_venture_with_scale_penalty() {
        let p = FundParameters::new(300.0, 15, Some(Strategy::VentureCapital));
        let b = score_breakdown(&jid("bvi"), &p);
        assert_eq!(b.base_score, 71);
        assert_eq!(b.strategy_offset, 2);
        assert_eq!(b.scale_penalty, 2);
        assert_eq!(b.complexity_penalty, 0);
        assert_eq!(b.score, 71);
    }

    #[test]
    fn ireland_real_estate_with_complexity_penalty() {
        let p = FundParameters::new(50.0, 40, Some(Strategy::RealEstate));
        assert_eq!(score(&jid("ireland"), &p), 83);
    }

    #[test]
    fn unknown_jurisdiction_uses_default_base() {
        let p = FundParameters::new(10.0, 5, Some(Strategy::VentureCapital));
        let b = score_breakdown(&jid("atlantis"), &p);
        assert!(!b.known_jurisdiction);
        assert_eq!(b.strategy_offset, 0);
        assert_eq!(b.score, DEFAULT_BASE_SCORE);

        let p = FundParameters::new(500.0, 100, None);
        assert_eq!(score(&jid("atlantis"), &p), DEFAULT_BASE_SCORE - 4);
    }

    #[test]
    fn absent_strategy_means_zero_offset() {
        let with_none = FundParameters::new(10.0, 5, None);
        let b = score_breakdown(&jid("delaware"), &with_none);
        assert_eq!(b.strategy_offset, 0);
        assert_eq!(b.score, 86);
    }

    #[test]
    fn negative_input_behaves_like_zero() {
        let negative = FundParameters::new(-1000.0, -50, Some(Strategy::PrivateCredit));
        let zero = FundParameters::new(0.0, 0, Some(Strategy::PrivateCredit));
        for id in reference::ids() {
            assert_eq!(score(id, &negative), score(id, &zero));
        }
    }

    #[test]
    fn both_penalties_stack() {
        let p = FundParameters::new(250.0, 30, Some(Strategy::PrivateEquity));
        let b = score_breakdown(&jid("guernsey"), &p);
        assert_eq!(b.unclamped, 82 + 2 - 2 - 2);
        assert_eq!(b.score, 80);
    }

    #[test]
    fn breakdown_serializes_camel_case() {
        let p = FundParameters::new(300.0, 15, Some(Strategy::VentureCapital));
        let json = serde_json::to_value(score_breakdown(&jid("bvi"), &p)).unwrap();
        assert_eq!(json["knownJurisdiction"], true);
        assert_eq!(json["scalePenalty"], 2);
        assert_eq!(json["score"], 71);
    }
}
