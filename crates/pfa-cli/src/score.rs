//! # `pfa score` — Score one jurisdiction.
//!
//! ```bash
//! pfa score cayman-islands --fund-size 100 --lp-count 15 --strategy private-equity
//! ```

use anyhow::{Context, Result};
use clap::Args;
use pfa_core::{FundParameters, JurisdictionId};
use pfa_scoring::{reference, score_breakdown, ScoreBreakdown};
use serde::Serialize;

use crate::params::FundArgs;

/// Arguments for `pfa score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Jurisdiction ID, e.g. `cayman-islands`. Unknown IDs score from the
    /// default base.
    pub jurisdiction: String,

    #[command(flatten)]
    pub fund: FundArgs,
}

/// A score with the terms behind it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub jurisdiction_id: JurisdictionId,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub parameters: FundParameters,
}

/// Execute `pfa score`.
pub fn run_score(args: &ScoreArgs) -> Result<ScoreReport> {
    let id: JurisdictionId = args
        .jurisdiction
        .parse()
        .with_context(|| format!("invalid jurisdiction ID '{}'", args.jurisdiction))?;
    let parameters = args.fund.resolve()?;

    if reference::lookup(&id).is_none() {
        tracing::warn!(jurisdiction = %id, "jurisdiction not in reference table, using default base score");
    }

    let breakdown = score_breakdown(&id, &parameters);
    Ok(ScoreReport {
        jurisdiction_id: id,
        score: breakdown.score,
        breakdown,
        parameters,
    })
}
