//! # Jurisdiction Identifiers
//!
//! A jurisdiction is a legal domicile for fund formation (e.g. the Cayman
//! Islands). [`JurisdictionId`] is the stable key into the reference table.
//!
//! ## Validation
//!
//! Only non-emptiness is enforced. An id that has no reference entry is
//! still a valid id: scoring falls back to the default base score for it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A jurisdiction identifier such as `"cayman-islands"` or `"bvi"`.
///
/// Ordered lexicographically by the underlying string, which is the
/// tie-break order used when ranking comparisons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JurisdictionId(String);

impl JurisdictionId {
    /// Create a jurisdiction identifier, validating non-emptiness.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJurisdictionId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidJurisdictionId);
        }
        if trimmed.len() == s.len() {
            Ok(Self(s))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Access the jurisdiction identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JurisdictionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for JurisdictionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JurisdictionId> for String {
    fn from(id: JurisdictionId) -> Self {
        id.0
    }
}

impl AsRef<str> for JurisdictionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
