//! # Fund Strategies — Single Source of Truth
//!
//! Defines the [`Strategy`] enum with all four supported investment styles.
//! Every `match` on this enum must be exhaustive, so adding a strategy
//! forces every offset table and suitability list to address it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A fund investment style, used as a scoring modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Buyout and growth equity funds.
    PrivateEquity,
    /// Property funds (core, value-add, opportunistic).
    RealEstate,
    /// Early- and late-stage venture funds.
    VentureCapital,
    /// Direct lending, mezzanine and distressed debt funds.
    PrivateCredit,
}

impl Strategy {
    /// Return all strategies as a slice.
    pub fn all() -> &'static [Strategy] {
        &[
            Self::PrivateEquity,
            Self::RealEstate,
            Self::VentureCapital,
            Self::PrivateCredit,
        ]
    }

    /// The total number of strategies.
    pub const COUNT: usize = 4;

    /// Wire representation (kebab-case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateEquity => "private-equity",
            Self::RealEstate => "real-estate",
            Self::VentureCapital => "venture-capital",
            Self::PrivateCredit => "private-credit",
        }
    }

    /// Parse a strategy, returning `None` for anything unrecognized.
    ///
    /// Accepts the kebab-case wire form as well as snake_case and any
    /// letter case, since hand-written query strings are inconsistent.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == normalized)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| ValidationError::UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_strategies_count() {
        assert_eq!(Strategy::all().len(), Strategy::COUNT);
    }

    #[test]
    fn as_str_matches_serde() {
        for s in Strategy::all() {
            let json = serde_json::to_string(s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.as_str()));
        }
    }

    #[test]
    fn from_str_roundtrips_display() {
        for s in Strategy::all() {
            let parsed: Strategy = s.to_string().parse().unwrap();
            assert_eq!(parsed, *s);
        }
    }

    #[test]
    fn lenient_parse_accepts_case_and_underscores() {
        assert_eq!(
            Strategy::parse_lenient("VENTURE_CAPITAL"),
            Some(Strategy::VentureCapital)
        );
        assert_eq!(
            Strategy::parse_lenient(" Real-Estate "),
            Some(Strategy::RealEstate)
        );
    }

    #[test]
    fn unknown_strategy_is_none_or_error() {
        assert_eq!(Strategy::parse_lenient("hedge-fund"), None);
        assert_eq!(Strategy::parse_lenient(""), None);
        assert!(matches!(
            "crypto".parse::<Strategy>(),
            Err(ValidationError::UnknownStrategy(s)) if s == "crypto"
        ));
    }
}
