//! # Fund Parameter Flags
//!
//! Shared by `score`, `compare` and `recommend`. Parameters come from an
//! optional YAML or JSON file (`--params`), then individual flags
//! override whatever the file set.
//!
//! ```yaml
//! fundSizeUSDMillions: 300
//! limitedPartnerCount: 45
//! strategy: private-equity
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pfa_core::{FundParameters, Strategy};

/// Fund description flags.
#[derive(Args, Debug, Default, Clone)]
pub struct FundArgs {
    /// YAML or JSON file holding fund parameters.
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Fund size in USD millions.
    #[arg(long, allow_negative_numbers = true)]
    pub fund_size: Option<f64>,

    /// Number of limited partners.
    #[arg(long, allow_negative_numbers = true)]
    pub lp_count: Option<i64>,

    /// Investment strategy (private-equity, real-estate, venture-capital,
    /// private-credit). Unrecognized values apply no strategy offset.
    #[arg(long)]
    pub strategy: Option<String>,
}

impl FundArgs {
    /// Resolve the effective parameters: file first, flags on top.
    pub fn resolve(&self) -> Result<FundParameters> {
        let base = match &self.params {
            Some(path) => load_params_file(path)?,
            None => FundParameters::default(),
        };

        // A given --strategy replaces the file's, even when unrecognized.
        let base = match self.strategy.as_deref() {
            Some(raw) => {
                let parsed = Strategy::parse_lenient(raw);
                if parsed.is_none() {
                    tracing::warn!(strategy = raw, "unrecognized strategy, no offset applied");
                }
                FundParameters::new(
                    base.fund_size_usd_millions(),
                    i64::from(base.limited_partner_count()),
                    parsed,
                )
            }
            None => base,
        };

        Ok(base.with_overrides(self.fund_size, self.lp_count, None))
    }
}

/// Read fund parameters from disk. `.json` files are parsed as JSON,
/// anything else as YAML.
pub fn load_params_file(path: &Path) -> Result<FundParameters> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read parameters file: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let params = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), "loaded fund parameters");
    Ok(params)
}
