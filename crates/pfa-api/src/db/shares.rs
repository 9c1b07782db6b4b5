//! Share link persistence.
//!
//! All functions take a `&PgPool` and operate on the `share_links` table.
//! Only the salted password digest is stored.

use chrono::{DateTime, Utc};
use pfa_scoring::SharePayload;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::password::PasswordDigest;
use crate::state::ShareLink;

/// Insert a share link.
pub async fn insert(pool: &PgPool, link: &ShareLink) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO share_links (id, payload, password_salt, password_digest, created_at, expires_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(link.id)
    .bind(Json(&link.payload))
    .bind(link.password.as_ref().map(|p| p.salt().to_vec()))
    .bind(link.password.as_ref().map(|p| p.digest().to_vec()))
    .bind(link.created_at)
    .bind(link.expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a share link. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM share_links WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every link that expired at or before `now`. Returns the count.
pub async fn delete_expired(pool: &PgPool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM share_links WHERE expires_at IS NOT NULL AND expires_at <= $1")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Load every share link.
///
/// Rows with an undecodable payload are skipped. So are rows with a
/// malformed password digest, rather than being loaded as unprotected links.
pub async fn load_all(pool: &PgPool) -> Result<Vec<ShareLink>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ShareLinkRow>(
        "SELECT id, payload, password_salt, password_digest, created_at, expires_at
         FROM share_links ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(ShareLinkRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ShareLinkRow {
    id: Uuid,
    payload: Json<serde_json::Value>,
    password_salt: Option<Vec<u8>>,
    password_digest: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl ShareLinkRow {
    fn into_record(self) -> Option<ShareLink> {
        let payload = match serde_json::from_value::<SharePayload>(self.payload.0) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(share_id = %self.id, error = %e, "undecodable share payload, skipping share link");
                return None;
            }
        };

        let password = match (&self.password_salt, &self.password_digest) {
            (None, None) => None,
            (Some(salt), Some(digest)) => match PasswordDigest::from_parts(salt, digest) {
                Some(p) => Some(p),
                None => {
                    tracing::error!(share_id = %self.id, "stored password digest has wrong length, skipping share link");
                    return None;
                }
            },
            _ => {
                tracing::error!(share_id = %self.id, "share link has half a password digest, skipping");
                return None;
            }
        };

        Some(ShareLink {
            id: self.id,
            payload,
            password,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}
