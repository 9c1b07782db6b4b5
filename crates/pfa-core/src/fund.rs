//! # Fund Parameters
//!
//! The user-supplied description of a fund, created fresh per request and
//! never mutated.
//!
//! ## Normalization
//!
//! Scoring input is never rejected for being out of range. On construction
//! (and on deserialization, which goes through the same path):
//!
//! - negative or non-finite fund sizes become `0.0`,
//! - negative LP counts become `0`; counts above `u32::MAX` saturate,
//! - fractional LP counts are floored,
//! - an unrecognized strategy string becomes `None` (zero offset).
//!
//! Missing fields default to the same zero values. Only structurally wrong
//! input (a string where a number belongs) fails deserialization.

use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

/// Fund size (USD millions) at or above which the scale penalty applies.
pub const SCALE_THRESHOLD_USD_MILLIONS: f64 = 250.0;

/// Limited partner count at or above which the complexity penalty applies.
pub const COMPLEXITY_LP_THRESHOLD: u32 = 30;

/// Normalized fund parameters.
///
/// Serialized with the cross-implementation field names
/// `fundSizeUSDMillions`, `limitedPartnerCount` and `strategy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FundParametersWire")]
pub struct FundParameters {
    #[serde(rename = "fundSizeUSDMillions")]
    fund_size_usd_millions: f64,
    #[serde(rename = "limitedPartnerCount")]
    limited_partner_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<Strategy>,
}

impl FundParameters {
    /// Build parameters from raw numbers, clamping out-of-range values.
    pub fn new(fund_size_usd_millions: f64, limited_partner_count: i64, strategy: Option<Strategy>) -> Self {
        Self {
            fund_size_usd_millions: normalize_fund_size(fund_size_usd_millions),
            limited_partner_count: u32::try_from(limited_partner_count.max(0)).unwrap_or(u32::MAX),
            strategy,
        }
    }

    /// Build parameters from loosely typed input: a fractional LP count is
    /// floored and saturates, an unrecognized strategy is dropped.
    pub fn from_raw(fund_size_usd_millions: f64, limited_partner_count: f64, strategy: Option<&str>) -> Self {
        // Float-to-int `as` saturates and maps NaN to zero.
        let lp_count = limited_partner_count.floor() as i64;
        Self::new(
            fund_size_usd_millions,
            lp_count,
            strategy.and_then(Strategy::parse_lenient),
        )
    }

    /// Fund size in USD millions, always finite and `>= 0`.
    pub fn fund_size_usd_millions(&self) -> f64 {
        self.fund_size_usd_millions
    }

    /// Number of limited partners.
    pub fn limited_partner_count(&self) -> u32 {
        self.limited_partner_count
    }

    /// Fund strategy, `None` when the caller supplied nothing recognizable.
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    /// Whether the fund is large enough to trigger the scale penalty.
    pub fn is_large_scale(&self) -> bool {
        self.fund_size_usd_millions >= SCALE_THRESHOLD_USD_MILLIONS
    }

    /// Whether the LP base is broad enough to trigger the complexity penalty.
    pub fn is_complex(&self) -> bool {
        self.limited_partner_count >= COMPLEXITY_LP_THRESHOLD
    }

    /// Return a copy with the given fields replaced. `None` keeps the
    /// current value.
    pub fn with_overrides(
        &self,
        fund_size_usd_millions: Option<f64>,
        limited_partner_count: Option<i64>,
        strategy: Option<Strategy>,
    ) -> Self {
        Self {
            fund_size_usd_millions: fund_size_usd_millions
                .map(normalize_fund_size)
                .unwrap_or(self.fund_size_usd_millions),
            limited_partner_count: limited_partner_count
                .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
                .unwrap_or(self.limited_partner_count),
            strategy: strategy.or(self.strategy),
        }
    }
}

impl Default for FundParameters {
    fn default() -> Self {
        Self::new(0.0, 0, None)
    }
}

fn normalize_fund_size(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Raw wire shape accepted from JSON bodies, query strings and parameter
/// files. Numbers are read as `f64` so that `15`, `15.0` and `"15"` in a
/// query string all land in the same place.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FundParametersWire {
    #[serde(default, rename = "fundSizeUSDMillions", alias = "fundSizeUsdMillions")]
    fund_size_usd_millions: f64,
    #[serde(default)]
    limited_partner_count: f64,
    #[serde(default)]
    strategy: Option<String>,
}

impl From<FundParametersWire> for FundParameters {
    fn from(wire: FundParametersWire) -> Self {
        Self::from_raw(
            wire.fund_size_usd_millions,
            wire.limited_partner_count,
            wire.strategy.as_deref(),
        )
    }
}
