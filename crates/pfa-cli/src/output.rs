//! JSON rendering for command results.

use anyhow::{Context, Result};
use serde::Serialize;

/// Render a result as pretty JSON, or one line when `compact` is set.
pub fn render<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    rendered.context("failed to serialize command output")
}

/// Render and write to stdout.
pub fn emit<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    println!("{}", render(value, compact)?);
    Ok(())
}
