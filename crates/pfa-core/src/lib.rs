//! # pfa-core — Foundational Types for the Private Fund Architect
//!
//! Every other crate in the workspace depends on `pfa-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`JurisdictionId`] is
//!    validated at construction. No bare strings for identifiers.
//!
//! 2. **Single [`Strategy`] enum.** One closed definition, exhaustive
//!    `match` everywhere. Adding a strategy forces every offset table to
//!    handle it.
//!
//! 3. **Permissive [`FundParameters`].** Fund inputs are normalized
//!    (negative → zero, unknown strategy → absent) instead of rejected.
//!    Only structurally wrong input, such as a string where a number is
//!    expected, fails deserialization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pfa-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod fund;
pub mod jurisdiction;
pub mod strategy;

// Re-export primary types for ergonomic imports.
pub use error::{PfaError, ValidationError};
pub use fund::{FundParameters, COMPLEXITY_LP_THRESHOLD, SCALE_THRESHOLD_USD_MILLIONS};
pub use jurisdiction::JurisdictionId;
pub use strategy::Strategy;
