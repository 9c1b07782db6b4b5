//! # Share Links API
//!
//! Stores a validated [`SharePayload`] behind an unguessable v4 UUID.
//! Links may be password-gated (password sent in the `x-share-password`
//! header) and may expire. Expired links are indistinguishable from
//! missing ones and are purged when encountered.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, SubsecRound, Utc};
use pfa_scoring::SharePayload;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::password::validate_password;
use crate::state::{AppState, ShareLink, MAX_SHARE_TTL_HOURS};

/// Header carrying the password for protected links.
pub const SHARE_PASSWORD_HEADER: &str = "x-share-password";

/// Create-share request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    /// Tagged envelope: `{"kind": "comparison", ...}` or `{"kind": "parameters", ...}`.
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub password: Option<String>,
    /// Hours until the link expires, 1 to 8760. Falls back to the server
    /// default, if any.
    #[serde(default)]
    pub expires_in_hours: Option<u32>,
}

impl Validate for CreateShareRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        if let Some(hours) = self.expires_in_hours {
            if !(1..=MAX_SHARE_TTL_HOURS).contains(&hours) {
                return Err(format!(
                    "expiresInHours must be between 1 and {MAX_SHARE_TTL_HOURS}"
                ));
            }
        }
        Ok(())
    }
}

/// Returned when a link is created.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareCreatedResponse {
    pub share_id: Uuid,
    pub password_protected: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A resolved share link.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_id: Uuid,
    pub payload: SharePayload,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Build the shares router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/shares", post(create_share))
        .route("/v1/shares/{id}", get(get_share))
}

/// POST /v1/shares — Store a payload behind a new share link.
#[utoipa::path(
    post,
    path = "/v1/shares",
    request_body = CreateShareRequest,
    responses(
        (status = 201, description = "Share link created", body = ShareCreatedResponse),
        (status = 422, description = "Invalid request or payload", body = crate::error::ErrorBody),
    ),
    tag = "shares"
)]
pub async fn create_share(
    State(state): State<AppState>,
    body: Result<Json<CreateShareRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShareCreatedResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let payload = SharePayload::from_value(req.payload)?;
    let ttl = req
        .expires_in_hours
        .or(state.config.share_default_ttl_hours);

    let link = ShareLink::new(
        payload,
        req.password.as_deref(),
        ttl,
        Utc::now().trunc_subsecs(0),
    );

    state.shares.insert(link.id, link.clone());

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::shares::insert(pool, &link).await {
            state.shares.remove(&link.id);
            tracing::error!(share_id = %link.id, error = %e, "failed to persist share link");
            return Err(AppError::Internal(
                "share link could not be persisted".to_string(),
            ));
        }
    }

    tracing::info!(
        share_id = %link.id,
        kind = link.payload.kind(),
        password_protected = link.is_password_protected(),
        expires_at = ?link.expires_at,
        "share link created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ShareCreatedResponse {
            share_id: link.id,
            password_protected: link.is_password_protected(),
            expires_at: link.expires_at,
        }),
    ))
}

/// GET /v1/shares/{id} — Resolve a share link.
#[utoipa::path(
    get,
    path = "/v1/shares/{id}",
    params(
        ("id" = Uuid, Path, description = "Share ID"),
        ("x-share-password" = Option<String>, Header, description = "Required for password-protected links"),
    ),
    responses(
        (status = 200, description = "Shared payload", body = ShareResponse),
        (status = 401, description = "Password missing or wrong", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown or expired link", body = crate::error::ErrorBody),
    ),
    tag = "shares"
)]
pub async fn get_share(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ShareResponse>, AppError> {
    let not_found = || AppError::NotFound(format!("share link {id} not found"));
    let link = state.shares.get(&id).ok_or_else(not_found)?;

    if link.is_expired(Utc::now()) {
        purge_expired(&state, id).await;
        return Err(not_found());
    }

    let supplied = headers
        .get(SHARE_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok());
    if !link.unlocks_with(supplied) {
        let reason = if supplied.is_some() {
            "incorrect share password"
        } else {
            "this share link requires a password"
        };
        tracing::debug!(share_id = %id, "share link access denied");
        return Err(AppError::Unauthorized(reason.to_string()));
    }

    Ok(Json(ShareResponse {
        share_id: link.id,
        payload: link.payload,
        created_at: link.created_at,
        expires_at: link.expires_at,
    }))
}

/// Drop an expired link from memory and, best effort, from the database.
async fn purge_expired(state: &AppState, id: Uuid) {
    state.shares.remove(&id);
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::shares::delete(pool, id).await {
            tracing::warn!(share_id = %id, error = %e, "failed to delete expired share link");
        }
    }
    tracing::debug!(share_id = %id, "expired share link purged");
}
