//! # pfa-cli — Command-Line Front End for the Scoring Engine
//!
//! Provides the `pfa` binary. Every command prints JSON on stdout, pretty
//! by default and single-line with `--compact`, so output pipes cleanly
//! into `jq` or a spreadsheet import.
//!
//! ## Subcommands
//!
//! - `pfa jurisdictions` — The reference table.
//! - `pfa score` — One jurisdiction, with the score breakdown.
//! - `pfa compare` — Several jurisdictions, ranked.
//! - `pfa recommend` — Strategy-filtered recommendation with alternatives.
//!
//! ```bash
//! pfa score bvi --fund-size 300 --lp-count 15 --strategy venture-capital
//! pfa compare cayman-islands luxembourg ireland --params fund.yaml --compact
//! ```

pub mod compare;
pub mod jurisdictions;
pub mod output;
pub mod params;
pub mod recommend;
pub mod score;
