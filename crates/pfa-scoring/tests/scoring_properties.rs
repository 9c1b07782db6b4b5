//! # Scoring Bounds and Determinism
//!
//! Property tests over the whole input space: scores stay in bounds,
//! thresholds deduct exactly two points before clamping, and comparison
//! order depends only on the inputs.

use chrono::{TimeZone, Utc};
use pfa_core::{FundParameters, JurisdictionId, Strategy as FundStrategy};
use pfa_scoring::{compare_at, reference, score, score_breakdown, SCORE_CEILING, SCORE_FLOOR};
use proptest::prelude::*;

fn fund_strategy() -> impl Strategy<Value = Option<FundStrategy>> {
    prop_oneof![
        Just(None),
        prop::sample::select(FundStrategy::all().to_vec()).prop_map(Some),
    ]
}

/// Known ids mixed with arbitrary lowercase slugs.
fn jurisdiction_id() -> impl Strategy<Value = JurisdictionId> {
    let known: Vec<JurisdictionId> = reference::ids().cloned().collect();
    prop_oneof![
        prop::sample::select(known),
        "[a-z][a-z-]{0,15}".prop_map(|s| JurisdictionId::new(s).unwrap()),
    ]
}

fn params() -> impl Strategy<Value = FundParameters> {
    (-1_000.0f64..10_000.0, -100i64..1_000, fund_strategy())
        .prop_map(|(size, lps, strategy)| FundParameters::new(size, lps, strategy))
}

proptest! {
    /// Every score lies in [40, 100].
    #[test]
    fn score_is_bounded(id in jurisdiction_id(), p in params()) {
        let s = score(&id, &p);
        prop_assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&s));
    }

    /// Scoring is a pure function of its inputs.
    #[test]
    fn score_is_deterministic(id in jurisdiction_id(), p in params()) {
        prop_assert_eq!(score_breakdown(&id, &p), score_breakdown(&id, &p));
    }

    /// Crossing the 250M size threshold deducts exactly 2 before clamping.
    #[test]
    fn scale_threshold_deducts_two(
        id in jurisdiction_id(),
        below in 0.0f64..250.0,
        above in 250.0f64..100_000.0,
        lps in 0i64..1_000,
        strategy in fund_strategy(),
    ) {
        let small = score_breakdown(&id, &FundParameters::new(below, lps, strategy));
        let large = score_breakdown(&id, &FundParameters::new(above, lps, strategy));
        prop_assert_eq!(small.unclamped - large.unclamped, 2);
        prop_assert!(large.score <= small.score);
    }

    /// Reaching 30 LPs deducts exactly 2 before clamping.
    #[test]
    fn complexity_threshold_deducts_two(
        id in jurisdiction_id(),
        size in 0.0f64..1_000.0,
        below in 0i64..30,
        above in 30i64..10_000,
        strategy in fund_strategy(),
    ) {
        let simple = score_breakdown(&id, &FundParameters::new(size, below, strategy));
        let complex = score_breakdown(&id, &FundParameters::new(size, above, strategy));
        prop_assert_eq!(simple.unclamped - complex.unclamped, 2);
        prop_assert!(complex.score <= simple.score);
    }

    /// Input order and duplicates never change the comparison.
    #[test]
    fn comparison_ignores_input_order(
        ids in prop::collection::vec(jurisdiction_id(), 0..12),
        p in params(),
    ) {
        let at = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let forward = compare_at(ids.clone(), &p, at);

        let mut shuffled = ids.clone();
        shuffled.reverse();
        shuffled.extend(ids.iter().cloned());
        let backward = compare_at(shuffled, &p, at);

        prop_assert_eq!(&forward, &backward);
        prop_assert!(forward.is_ordered());
    }

    /// Every entry's score equals a direct call to the scoring function.
    #[test]
    fn comparison_scores_match_scoring(
        ids in prop::collection::vec(jurisdiction_id(), 1..12),
        p in params(),
    ) {
        let at = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        for entry in compare_at(ids, &p, at).ordered_scores {
            prop_assert_eq!(entry.score, score(&entry.jurisdiction_id, &p));
        }
    }
}

#[test]
fn exact_thresholds_apply_penalties() {
    let id = JurisdictionId::new("singapore").unwrap();
    let at_threshold = FundParameters::new(250.0, 30, Some(FundStrategy::PrivateEquity));
    let just_below = FundParameters::new(249.99, 29, Some(FundStrategy::PrivateEquity));
    assert_eq!(score(&id, &at_threshold), 79);
    assert_eq!(score(&id, &just_below), 83);
}

#[test]
fn every_reference_jurisdiction_scores_in_bounds_for_every_strategy() {
    let p_values = [
        FundParameters::new(0.0, 0, None),
        FundParameters::new(1_000_000.0, 1_000_000, None),
    ];
    for id in reference::ids() {
        for base in &p_values {
            for strategy in FundStrategy::all() {
                let p = base.with_overrides(None, None, Some(*strategy));
                let s = score(id, &p);
                assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&s), "{id}: {s}");
            }
        }
    }
}
