//! # API Route Modules
//!
//! - `jurisdictions`: reference table and single-jurisdiction scoring.
//! - `comparisons`: rank a set of jurisdictions for a fund.
//! - `recommendations`: strategy-filtered architect ranking.
//! - `saved`: named comparisons, computed server-side and persisted.
//! - `shares`: validated payloads behind password-gated, expiring links.

pub mod comparisons;
pub mod jurisdictions;
pub mod recommendations;
pub mod saved;
pub mod shares;
