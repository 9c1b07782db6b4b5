//! # Application State
//!
//! Shared state for the Axum application. The scoring engine is stateless;
//! what lives here is the facade's own data: saved comparisons and share
//! links.
//!
//! Records are held in in-memory [`Store`]s. When a Postgres pool is
//! configured, handlers write through to the database and the stores are
//! hydrated from it at startup. Without one, state resets on restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use pfa_core::{FundParameters, JurisdictionId};
use pfa_scoring::{ComparisonResult, SharePayload};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::password::PasswordDigest;

// -- Generic Store ------------------------------------------------------------

/// Thread-safe in-memory store keyed by UUID.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records, in no particular order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Remove a record by ID.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Keep only the records matching `keep`. Returns how many were dropped.
    pub fn retain(&self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let mut guard = self.data.write();
        let before = guard.len();
        guard.retain(|_, v| keep(v));
        before - guard.len()
    }

    /// Check if a record exists.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.data.read().contains_key(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Records ------------------------------------------------------------------

/// A named comparison kept for later retrieval.
///
/// The result is computed server-side when the comparison is saved, so it
/// always agrees with the engine that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedComparison {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Vec<String>)]
    pub jurisdiction_ids: Vec<JurisdictionId>,
    #[schema(value_type = Object)]
    pub parameters: FundParameters,
    pub result: ComparisonResult,
    pub created_at: DateTime<Utc>,
}

/// A stored payload behind an opaque share id.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    pub id: Uuid,
    pub payload: SharePayload,
    pub password: Option<PasswordDigest>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareLink {
    /// Build a link expiring `ttl_hours` after `now`, if a TTL is given.
    pub fn new(
        payload: SharePayload,
        password: Option<&str>,
        ttl_hours: Option<u32>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
            password: password.map(PasswordDigest::new),
            created_at: now,
            expires_at: ttl_hours.map(|h| now + Duration::hours(i64::from(h))),
        }
    }

    pub fn is_password_protected(&self) -> bool {
        self.password.is_some()
    }

    /// Expired links are treated as absent.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Whether `supplied` unlocks this link. Unprotected links always open.
    pub fn unlocks_with(&self, supplied: Option<&str>) -> bool {
        match (&self.password, supplied) {
            (None, _) => true,
            (Some(digest), Some(candidate)) => digest.verify(candidate),
            (Some(_), None) => false,
        }
    }
}

// -- Configuration ------------------------------------------------------------

/// Longest share-link lifetime, in hours (one year).
pub const MAX_SHARE_TTL_HOURS: u32 = 8_760;

/// Application configuration, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Serve `/metrics` and record request metrics.
    pub metrics_enabled: bool,
    /// Expiry applied to share links created without `expiresInHours`.
    /// `None` means such links never expire.
    pub share_default_ttl_hours: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            metrics_enabled: true,
            share_default_ttl_hours: None,
        }
    }
}

impl AppConfig {
    /// Read `PORT`, `PFA_METRICS_ENABLED` and `PFA_SHARE_DEFAULT_TTL_HOURS`.
    ///
    /// Unparseable values fall back to defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid PORT, using {}", defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        let metrics_enabled = get("PFA_METRICS_ENABLED")
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(defaults.metrics_enabled);

        let share_default_ttl_hours = get("PFA_SHARE_DEFAULT_TTL_HOURS").and_then(|raw| {
            match raw.parse::<u32>() {
                Ok(h) if (1..=MAX_SHARE_TTL_HOURS).contains(&h) => Some(h),
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "invalid PFA_SHARE_DEFAULT_TTL_HOURS (expected 1..={MAX_SHARE_TTL_HOURS}), share links will not expire by default"
                    );
                    None
                }
            }
        });

        Self {
            port,
            metrics_enabled,
            share_default_ttl_hours,
        }
    }
}

// -- AppState -----------------------------------------------------------------

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub saved_comparisons: Store<SavedComparison>,
    pub shares: Store<ShareLink>,

    /// PostgreSQL pool for durable state. `None` means in-memory only.
    pub db_pool: Option<PgPool>,

    pub config: AppConfig,
}

impl AppState {
    /// In-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// State with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            saved_comparisons: Store::new(),
            shares: Store::new(),
            db_pool,
            config,
        }
    }

    /// Load persisted records into the in-memory stores.
    ///
    /// Expired share links are skipped. No-op without a database pool.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let saved = crate::db::saved_comparisons::load_all(pool)
            .await
            .map_err(|e| format!("failed to load saved comparisons: {e}"))?;
        let saved_count = saved.len();
        for record in saved {
            self.saved_comparisons.insert(record.id, record);
        }

        let now = Utc::now();
        let shares = crate::db::shares::load_all(pool)
            .await
            .map_err(|e| format!("failed to load share links: {e}"))?;
        let mut share_count = 0usize;
        for link in shares.into_iter().filter(|l| !l.is_expired(now)) {
            self.shares.insert(link.id, link);
            share_count += 1;
        }

        tracing::info!(
            saved_comparisons = saved_count,
            share_links = share_count,
            "hydrated in-memory stores from database"
        );
        Ok(())
    }
}

impl AppState {
    /// Remove expired share links from memory and the database.
    ///
    /// Returns how many in-memory links were dropped.
    pub async fn purge_expired_shares(&self, now: DateTime<Utc>) -> usize {
        let dropped = self.shares.retain(|link| !link.is_expired(now));
        if let Some(pool) = &self.db_pool {
            match crate::db::shares::delete_expired(pool, now).await {
                Ok(rows) => tracing::debug!(rows, "expired share links deleted from database"),
                Err(e) => tracing::warn!(error = %e, "failed to delete expired share links"),
            }
        }
        if dropped > 0 {
            tracing::info!(dropped, "expired share links purged");
        }
        dropped
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfa_scoring::ParametersSnapshot;

    fn payload() -> SharePayload {
        SharePayload::Parameters(ParametersSnapshot {
            parameters: FundParameters::default(),
            title: None,
        })
    }

    #[test]
    fn store_insert_get_remove() {
        let store: Store<String> = Store::new();
        let id = Uuid::new_v4();
        assert!(store.insert(id, "a".to_string()).is_none());
        assert_eq!(store.get(&id).as_deref(), Some("a"));
        assert!(store.contains(&id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.remove(&id).as_deref(), Some("a"));
        assert!(store.is_empty());
    }

    #[test]
    fn store_clones_share_data() {
        let store: Store<u32> = Store::new();
        let clone = store.clone();
        clone.insert(Uuid::new_v4(), 7);
        assert_eq!(store.list(), vec![7]);
    }

    #[test]
    fn store_retain_reports_dropped() {
        let store: Store<u32> = Store::new();
        for n in 0..5 {
            store.insert(Uuid::new_v4(), n);
        }
        assert_eq!(store.retain(|n| n % 2 == 0), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn share_link_expiry() {
        let now = Utc::now();
        let link = ShareLink::new(payload(), None, Some(1), now);
        assert!(!link.is_expired(now));
        assert!(link.is_expired(now + Duration::hours(1)));

        let forever = ShareLink::new(payload(), None, None, now);
        assert!(!forever.is_expired(now + Duration::days(10_000)));
    }

    #[test]
    fn share_link_password_gate() {
        let now = Utc::now();
        let open = ShareLink::new(payload(), None, None, now);
        assert!(!open.is_password_protected());
        assert!(open.unlocks_with(None));
        assert!(open.unlocks_with(Some("anything")));

        let locked = ShareLink::new(payload(), Some("s3cret"), None, now);
        assert!(locked.is_password_protected());
        assert!(!locked.unlocks_with(None));
        assert!(!locked.unlocks_with(Some("wrong")));
        assert!(locked.unlocks_with(Some("s3cret")));
    }

    #[test]
    fn share_ids_are_unique() {
        let now = Utc::now();
        let a = ShareLink::new(payload(), None, None, now);
        let b = ShareLink::new(payload(), None, None, now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn config_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 8080);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn config_reads_values() {
        let config = AppConfig::from_lookup(|key| match key {
            "PORT" => Some("9090".to_string()),
            "PFA_METRICS_ENABLED" => Some("FALSE".to_string()),
            "PFA_SHARE_DEFAULT_TTL_HOURS" => Some("72".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 9090);
        assert!(!config.metrics_enabled);
        assert_eq!(config.share_default_ttl_hours, Some(72));
    }

    #[test]
    fn config_ignores_bad_values() {
        let config = AppConfig::from_lookup(|key| match key {
            "PORT" => Some("eighty".to_string()),
            "PFA_SHARE_DEFAULT_TTL_HOURS" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
        assert_eq!(config.share_default_ttl_hours, None);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_links() {
        let state = AppState::new();
        let created = Utc::now() - Duration::hours(2);
        let stale = ShareLink::new(payload(), None, Some(1), created);
        let fresh = ShareLink::new(payload(), None, Some(24), created);
        state.shares.insert(stale.id, stale.clone());
        state.shares.insert(fresh.id, fresh.clone());

        assert_eq!(state.purge_expired_shares(Utc::now()).await, 1);
        assert!(!state.shares.contains(&stale.id));
        assert!(state.shares.contains(&fresh.id));
    }

    #[tokio::test]
    async fn hydrate_without_pool_is_noop() {
        let state = AppState::new();
        state.hydrate_from_db().await.unwrap();
        assert!(state.saved_comparisons.is_empty());
    }
}
