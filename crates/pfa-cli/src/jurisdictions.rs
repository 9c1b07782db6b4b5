//! # `pfa jurisdictions` — Print the reference table.
//!
//! ```bash
//! pfa jurisdictions
//! pfa jurisdictions --strategy venture-capital --compact
//! ```

use anyhow::Result;
use clap::Args;
use pfa_core::Strategy;
use pfa_scoring::{reference, JurisdictionReference};

/// Arguments for `pfa jurisdictions`.
#[derive(Args, Debug, Default)]
pub struct JurisdictionsArgs {
    /// Only list jurisdictions suitable for this strategy.
    #[arg(long)]
    pub strategy: Option<Strategy>,
}

/// Reference entries in table order, optionally filtered by suitability.
pub fn run_jurisdictions(args: &JurisdictionsArgs) -> Result<Vec<JurisdictionReference>> {
    let entries: Vec<JurisdictionReference> = reference::all()
        .iter()
        .filter(|r| args.strategy.map_or(true, |s| r.is_suitable_for(s)))
        .cloned()
        .collect();
    tracing::debug!(count = entries.len(), "listing jurisdictions");
    Ok(entries)
}
