//! # `pfa recommend` — Pick a domicile for a fund.
//!
//! ```bash
//! pfa recommend --strategy venture-capital --fund-size 50 --limit 5
//! ```

use anyhow::Result;
use clap::Args;
use pfa_scoring::{recommend, Recommendation, DEFAULT_RECOMMENDATION_LIMIT};

use crate::params::FundArgs;

/// Arguments for `pfa recommend`.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub fund: FundArgs,

    /// Entries to return, including the recommendation itself.
    #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT as u16, value_parser = clap::value_parser!(u16).range(1..=32))]
    pub limit: u16,
}

/// Execute `pfa recommend`.
pub fn run_recommend(args: &RecommendArgs) -> Result<Recommendation> {
    let parameters = args.fund.resolve()?;
    let recommendation = recommend(&parameters, usize::from(args.limit));
    if recommendation.recommended.is_none() {
        tracing::warn!("no jurisdiction in the reference table suits this fund");
    }
    Ok(recommendation)
}
