//! Saved comparison persistence.
//!
//! All functions take a `&PgPool` and operate on the `saved_comparisons` table.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::state::SavedComparison;

/// Insert a saved comparison.
pub async fn insert(pool: &PgPool, record: &SavedComparison) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO saved_comparisons (id, name, jurisdiction_ids, parameters, result, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(Json(&record.jurisdiction_ids))
    .bind(Json(&record.parameters))
    .bind(Json(&record.result))
    .bind(record.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a saved comparison. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM saved_comparisons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load every saved comparison, newest first.
///
/// Rows whose JSON columns no longer decode are logged and skipped.
pub async fn load_all(pool: &PgPool) -> Result<Vec<SavedComparison>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SavedComparisonRow>(
        "SELECT id, name, jurisdiction_ids, parameters, result, created_at
         FROM saved_comparisons ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(SavedComparisonRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct SavedComparisonRow {
    id: Uuid,
    name: String,
    jurisdiction_ids: Json<serde_json::Value>,
    parameters: Json<serde_json::Value>,
    result: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl SavedComparisonRow {
    fn into_record(self) -> Option<SavedComparison> {
        let id = self.id;
        match self.decode() {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!(saved_comparison_id = %id, error = %e, "undecodable saved comparison row, skipping");
                None
            }
        }
    }

    fn decode(self) -> Result<SavedComparison, serde_json::Error> {
        Ok(SavedComparison {
            id: self.id,
            name: self.name,
            jurisdiction_ids: serde_json::from_value(self.jurisdiction_ids.0)?,
            parameters: serde_json::from_value(self.parameters.0)?,
            result: serde_json::from_value(self.result.0)?,
            created_at: self.created_at,
        })
    }
}
