//! # `pfa compare` — Rank several jurisdictions.
//!
//! ```bash
//! pfa compare cayman-islands bvi jersey --params fund.yaml
//! ```

use anyhow::{Context, Result};
use clap::Args;
use pfa_core::JurisdictionId;
use pfa_scoring::{compare, ComparisonResult};

use crate::params::FundArgs;

/// Arguments for `pfa compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Jurisdiction IDs to rank. Duplicates are scored once.
    #[arg(required = true, num_args = 1..)]
    pub jurisdictions: Vec<String>,

    #[command(flatten)]
    pub fund: FundArgs,
}

/// Execute `pfa compare`.
pub fn run_compare(args: &CompareArgs) -> Result<ComparisonResult> {
    let ids = args
        .jurisdictions
        .iter()
        .map(|raw| {
            raw.parse::<JurisdictionId>()
                .with_context(|| format!("invalid jurisdiction ID '{raw}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    let parameters = args.fund.resolve()?;

    let result = compare(ids, &parameters);
    tracing::debug!(entries = result.len(), "comparison complete");
    Ok(result)
}
