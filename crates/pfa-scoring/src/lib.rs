//! # pfa-scoring — Jurisdiction Scoring & Comparison Engine
//!
//! Ranks candidate fund domiciles for a given fund description.
//!
//! - [`reference`]: the static jurisdiction table, loaded once.
//! - [`scoring`]: the bounded, pure scoring function.
//! - [`comparison`]: deterministic ordering of a jurisdiction set.
//! - [`recommendation`]: strategy-filtered "architect" ranking.
//! - [`payload`]: the validated envelope stored behind share links.
//!
//! Nothing here performs I/O or holds mutable shared state. The same
//! inputs always produce the same scores and the same order; only the
//! `generated_at` stamp depends on the clock, and `*_at` variants take it
//! explicitly.
//!
//! ## Crate Policy
//!
//! - Depends only on `pfa-core` internally.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod comparison;
pub mod payload;
pub mod recommendation;
pub mod reference;
pub mod scoring;

pub use comparison::{compare, compare_at, ComparisonResult, RankedRow, ScoreResult};
pub use payload::{ComparisonSnapshot, ParametersSnapshot, PayloadError, SharePayload};
pub use recommendation::{
    recommend, recommend_at, RankedProfile, Recommendation, DEFAULT_RECOMMENDATION_LIMIT,
};
pub use reference::{JurisdictionReference, Span, StrategyOffsets};
pub use scoring::{score, score_breakdown, ScoreBreakdown, SCORE_CEILING, SCORE_FLOOR};
