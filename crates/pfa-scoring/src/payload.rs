//! # Share Payload Envelope
//!
//! Shared links carry a snapshot of either a comparison or a bare set of
//! fund parameters. The envelope is tagged by `kind` and rejects unknown
//! fields, so anything stored behind a share id has a known shape:
//!
//! ```json
//! {"kind": "comparison", "comparison": {...}, "parameters": {...}, "title": "..."}
//! {"kind": "parameters", "parameters": {...}, "title": "..."}
//! ```
//!
//! [`SharePayload::validate`] checks the business rules serde cannot:
//! ranking order, score bounds, entry limits and, when parameters are
//! attached to a comparison, that the scores match what the engine
//! produces for them.

use std::collections::HashSet;

use pfa_core::{FundParameters, JurisdictionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comparison::ComparisonResult;
use crate::scoring::{score, SCORE_CEILING, SCORE_FLOOR};

/// Most entries a shared comparison may carry.
pub const MAX_SHARED_ENTRIES: usize = 64;

/// Longest accepted snapshot title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Validation failure for a share payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The JSON did not match either envelope shape.
    #[error("malformed share payload: {0}")]
    Malformed(String),

    /// A jurisdiction appears more than once.
    #[error("duplicate jurisdiction in comparison: {0}")]
    DuplicateJurisdiction(JurisdictionId),

    /// A score lies outside the range the engine can produce.
    #[error("score {score} for {jurisdiction} is outside [{}, {}]", SCORE_FLOOR, SCORE_CEILING)]
    ScoreOutOfRange {
        jurisdiction: JurisdictionId,
        score: u8,
    },

    /// Entries are not sorted by score descending, then id ascending.
    #[error("comparison entries are not in ranking order")]
    Unordered,

    /// Too many entries.
    #[error("comparison has {count} entries (max {})", MAX_SHARED_ENTRIES)]
    TooManyEntries { count: usize },

    /// A score disagrees with the attached parameters.
    #[error("score for {jurisdiction} is {claimed}, but the attached parameters give {expected}")]
    StaleScore {
        jurisdiction: JurisdictionId,
        claimed: u8,
        expected: u8,
    },

    /// Title exceeds [`MAX_TITLE_CHARS`].
    #[error("title is {chars} characters (max {})", MAX_TITLE_CHARS)]
    TitleTooLong { chars: usize },
}

/// A comparison snapshot, optionally with the parameters behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ComparisonSnapshot {
    pub comparison: ComparisonResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub parameters: Option<FundParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A fund-parameters snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ParametersSnapshot {
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub parameters: FundParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The tagged envelope stored behind a share link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SharePayload {
    Comparison(ComparisonSnapshot),
    Parameters(ParametersSnapshot),
}

impl SharePayload {
    /// Parse and validate an untyped JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, PayloadError> {
        let payload: Self =
            serde_json::from_value(value).map_err(|e| PayloadError::Malformed(e.to_string()))?;
        payload.validate()?;
        Ok(payload)
    }

    /// Wire name of the envelope kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Comparison(_) => "comparison",
            Self::Parameters(_) => "parameters",
        }
    }

    /// Optional display title.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Comparison(s) => s.title.as_deref(),
            Self::Parameters(s) => s.title.as_deref(),
        }
    }

    /// Check the rules serde cannot express.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if let Some(title) = self.title() {
            let chars = title.chars().count();
            if chars > MAX_TITLE_CHARS {
                return Err(PayloadError::TitleTooLong { chars });
            }
        }
        match self {
            Self::Comparison(snapshot) => validate_comparison(snapshot),
            Self::Parameters(_) => Ok(()),
        }
    }
}

fn validate_comparison(snapshot: &ComparisonSnapshot) -> Result<(), PayloadError> {
    let entries = &snapshot.comparison.ordered_scores;
    if entries.len() > MAX_SHARED_ENTRIES {
        return Err(PayloadError::TooManyEntries {
            count: entries.len(),
        });
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(&entry.jurisdiction_id) {
            return Err(PayloadError::DuplicateJurisdiction(
                entry.jurisdiction_id.clone(),
            ));
        }
        if !(SCORE_FLOOR..=SCORE_CEILING).contains(&entry.score) {
            return Err(PayloadError::ScoreOutOfRange {
                jurisdiction: entry.jurisdiction_id.clone(),
                score: entry.score,
            });
        }
    }

    if !snapshot.comparison.is_ordered() {
        return Err(PayloadError::Unordered);
    }

    if let Some(params) = &snapshot.parameters {
        for entry in entries {
            let expected = score(&entry.jurisdiction_id, params);
            if expected != entry.score {
                return Err(PayloadError::StaleScore {
                    jurisdiction: entry.jurisdiction_id.clone(),
                    claimed: entry.score,
                    expected,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::compare_at;
    use chrono::{TimeZone, Utc};
    use pfa_core::Strategy;
    use serde_json::json;

    fn params() -> FundParameters {
        FundParameters::new(100.0, 15, Some(Strategy::PrivateEquity))
    }

    fn comparison() -> ComparisonResult {
        let ids = ["cayman-islands", "bvi", "jersey"]
            .iter()
            .map(|s| JurisdictionId::new(*s).unwrap());
        compare_at(ids, &params(), Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap())
    }

    #[test]
    fn engine_output_is_a_valid_payload() {
        let payload = SharePayload::Comparison(ComparisonSnapshot {
            comparison: comparison(),
            parameters: Some(params()),
            title: Some("Fund III domicile".to_string()),
        });
        assert!(payload.validate().is_ok());
        assert_eq!(payload.kind(), "comparison");
    }

    #[test]
    fn parses_tagged_json() {
        let value = json!({
            "kind": "parameters",
            "parameters": {"fundSizeUSDMillions": 75, "limitedPartnerCount": 12, "strategy": "private-credit"}
        });
        let payload = SharePayload::from_value(value).unwrap();
        match payload {
            SharePayload::Parameters(s) => {
                assert_eq!(s.parameters.strategy(), Some(Strategy::PrivateCredit));
                assert!(s.title.is_none());
            }
            other => panic!("expected parameters payload, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = SharePayload::from_value(json!({"kind": "spreadsheet", "rows": []})).unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn rejects_missing_kind() {
        let err = SharePayload::from_value(json!({"parameters": {}})).unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = SharePayload::from_value(json!({
            "kind": "parameters",
            "parameters": {},
            "anything": {"goes": true}
        }))
        .unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn rejects_out_of_range_score() {
        let value = json!({
            "kind": "comparison",
            "comparison": {
                "orderedScores": [{"jurisdictionId": "bvi", "score": 12}],
                "generatedAt": "2026-02-02T00:00:00Z"
            }
        });
        let err = SharePayload::from_value(value).unwrap_err();
        assert!(matches!(err, PayloadError::ScoreOutOfRange { score: 12, .. }));
    }

    #[test]
    fn rejects_unordered_entries() {
        let mut c = comparison();
        c.ordered_scores.reverse();
        let payload = SharePayload::Comparison(ComparisonSnapshot {
            comparison: c,
            parameters: None,
            title: None,
        });
        assert_eq!(payload.validate(), Err(PayloadError::Unordered));
    }

    #[test]
    fn rejects_duplicates() {
        let mut c = comparison();
        let first = c.ordered_scores[0].clone();
        c.ordered_scores.insert(1, first);
        let payload = SharePayload::Comparison(ComparisonSnapshot {
            comparison: c,
            parameters: None,
            title: None,
        });
        assert!(matches!(
            payload.validate(),
            Err(PayloadError::DuplicateJurisdiction(id)) if id.as_str() == "cayman-islands"
        ));
    }

    #[test]
    fn rejects_scores_that_disagree_with_parameters() {
        let other = FundParameters::new(400.0, 50, Some(Strategy::PrivateEquity));
        let payload = SharePayload::Comparison(ComparisonSnapshot {
            comparison: comparison(),
            parameters: Some(other),
            title: None,
        });
        assert!(matches!(
            payload.validate(),
            Err(PayloadError::StaleScore { claimed: 89, expected: 85, .. })
        ));
    }

    #[test]
    fn rejects_long_title() {
        let payload = SharePayload::Parameters(ParametersSnapshot {
            parameters: params(),
            title: Some("x".repeat(MAX_TITLE_CHARS + 1)),
        });
        assert!(matches!(
            payload.validate(),
            Err(PayloadError::TitleTooLong { .. })
        ));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let payload = SharePayload::Parameters(ParametersSnapshot {
            parameters: params(),
            title: None,
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "parameters");
        assert_eq!(json["parameters"]["limitedPartnerCount"], 15);
        assert!(json.get("title").is_none());
    }
}
