//! # Jurisdiction Reference Data
//!
//! The static table of candidate fund domiciles. Built once on first
//! access into a process-wide [`OnceLock`] and read-only for the life of
//! the process; there is no mutation path and nothing to tear down.
//!
//! Absence is a normal outcome of [`lookup`]. Callers apply the documented
//! defaults (see [`crate::scoring`]) instead of failing.

use std::sync::OnceLock;

use pfa_core::Strategy::{PrivateCredit, PrivateEquity, RealEstate, VentureCapital};
use pfa_core::{JurisdictionId, Strategy};
use serde::{Deserialize, Serialize};

/// Per-strategy score adjustment for one jurisdiction.
///
/// A total mapping: every strategy has an explicit field, zero unless set.
/// Adding a [`Strategy`] variant breaks [`StrategyOffsets::get`] until the
/// new field exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StrategyOffsets {
    pub private_equity: i8,
    pub real_estate: i8,
    pub venture_capital: i8,
    pub private_credit: i8,
}

impl StrategyOffsets {
    /// Offset for a strategy. An absent strategy has no offset.
    pub fn get(&self, strategy: Option<Strategy>) -> i8 {
        match strategy {
            Some(Strategy::PrivateEquity) => self.private_equity,
            Some(Strategy::RealEstate) => self.real_estate,
            Some(Strategy::VentureCapital) => self.venture_capital,
            Some(Strategy::PrivateCredit) => self.private_credit,
            None => 0,
        }
    }
}

/// Inclusive numeric range used for cost and timeline estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

/// Base attributes of one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionReference {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: JurisdictionId,
    /// Human-readable name.
    pub name: String,
    /// Strategy-agnostic suitability rating in `[0, 100]`.
    pub base_score: u8,
    pub strategy_offsets: StrategyOffsets,
    /// Typical formation cost, USD thousands.
    pub formation_cost_usd_thousands: Span,
    /// Typical time to first close-ready vehicle, in weeks.
    pub formation_timeline_weeks: Span,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub suitable_strategies: Vec<Strategy>,
}

impl JurisdictionReference {
    /// Whether the jurisdiction lists `strategy` as a good fit.
    pub fn is_suitable_for(&self, strategy: Strategy) -> bool {
        self.suitable_strategies.contains(&strategy)
    }
}

struct Row {
    id: &'static str,
    name: &'static str,
    base_score: u8,
    offsets: StrategyOffsets,
    cost: (u32, u32),
    weeks: (u32, u32),
    suitable: &'static [Strategy],
}

const fn offsets(pe: i8, re: i8, vc: i8, pc: i8) -> StrategyOffsets {
    StrategyOffsets {
        private_equity: pe,
        real_estate: re,
        venture_capital: vc,
        private_credit: pc,
    }
}

const ROWS: &[Row] = &[
    Row {
        id: "cayman-islands",
        name: "Cayman Islands",
        base_score: 89,
        offsets: offsets(0, 0, 1, 2),
        cost: (35, 75),
        weeks: (4, 8),
        suitable: &[PrivateEquity, RealEstate, VentureCapital, PrivateCredit],
    },
    Row {
        id: "luxembourg",
        name: "Luxembourg",
        base_score: 88,
        offsets: offsets(0, 3, -1, 2),
        cost: (80, 200),
        weeks: (8, 16),
        suitable: &[PrivateEquity, RealEstate, PrivateCredit],
    },
    Row {
        id: "ireland",
        name: "Ireland",
        base_score: 87,
        offsets: offsets(0, -2, 0, 2),
        cost: (60, 150),
        weeks: (8, 14),
        suitable: &[PrivateEquity, PrivateCredit],
    },
    Row {
        id: "delaware",
        name: "Delaware",
        base_score: 86,
        offsets: offsets(0, 1, 4, 0),
        cost: (15, 40),
        weeks: (2, 4),
        suitable: &[PrivateEquity, RealEstate, VentureCapital],
    },
    Row {
        id: "jersey",
        name: "Jersey",
        base_score: 84,
        offsets: offsets(1, 2, 0, 0),
        cost: (40, 90),
        weeks: (3, 6),
        suitable: &[PrivateEquity, RealEstate],
    },
    Row {
        id: "singapore",
        name: "Singapore",
        base_score: 83,
        offsets: offsets(0, 0, 2, 1),
        cost: (40, 100),
        weeks: (6, 12),
        suitable: &[PrivateEquity, VentureCapital, PrivateCredit],
    },
    Row {
        id: "guernsey",
        name: "Guernsey",
        base_score: 82,
        offsets: offsets(2, 0, 0, 0),
        cost: (40, 85),
        weeks: (3, 6),
        suitable: &[PrivateEquity, PrivateCredit],
    },
    Row {
        id: "bvi",
        name: "British Virgin Islands",
        base_score: 71,
        offsets: offsets(0, 0, 2, 0),
        cost: (20, 45),
        weeks: (2, 5),
        suitable: &[PrivateEquity, VentureCapital],
    },
];

static TABLE: OnceLock<Vec<JurisdictionReference>> = OnceLock::new();

fn table() -> &'static [JurisdictionReference] {
    TABLE.get_or_init(|| {
        let table: Vec<JurisdictionReference> = ROWS
            .iter()
            .filter_map(|row| match JurisdictionId::new(row.id) {
                Ok(id) => Some(JurisdictionReference {
                    id,
                    name: row.name.to_string(),
                    base_score: row.base_score,
                    strategy_offsets: row.offsets,
                    formation_cost_usd_thousands: Span {
                        min: row.cost.0,
                        max: row.cost.1,
                    },
                    formation_timeline_weeks: Span {
                        min: row.weeks.0,
                        max: row.weeks.1,
                    },
                    suitable_strategies: row.suitable.to_vec(),
                }),
                Err(e) => {
                    tracing::error!(row = row.id, error = %e, "skipping invalid reference row");
                    None
                }
            })
            .collect();
        tracing::debug!(jurisdictions = table.len(), "jurisdiction reference table loaded");
        table
    })
}

/// Look up a jurisdiction's reference entry.
pub fn lookup(id: &JurisdictionId) -> Option<&'static JurisdictionReference> {
    lookup_str(id.as_str())
}

/// Look up by raw string, for callers that have not validated an id yet.
pub fn lookup_str(id: &str) -> Option<&'static JurisdictionReference> {
    table().iter().find(|r| r.id.as_str() == id)
}

/// Every reference entry, in table order (base score descending).
pub fn all() -> &'static [JurisdictionReference] {
    table()
}

/// Ids of every reference entry, in table order.
pub fn ids() -> impl Iterator<Item = &'static JurisdictionId> {
    table().iter().map(|r| &r.id)
}
