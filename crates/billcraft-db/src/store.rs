//! # String-Keyed JSON Store
//!
//! The single persistence primitive for Billcraft: whole collections
//! serialized as JSON under well-known keys.
//!
//! ## Why Not Row-Per-Document?
//! The dataset is a single shop's paperwork, hundreds of documents at
//! most. Reading and writing one value per key keeps every save
//! atomic (one UPSERT) and the schema immune to entity churn. If the
//! dataset ever outgrows this, a `documents` table can be introduced
//! in a later migration without touching callers.
//!
//! ## Keys
//! | Key         | Value                                    |
//! |-------------|------------------------------------------|
//! | `documents` | JSON array of every estimate and bill    |
//! | `settings`  | JSON object, the business settings       |

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use billcraft_core::{Document, SettingsProfile};

use crate::error::{DbError, DbResult};

/// Key under which the document collection is stored.
pub const DOCUMENTS_KEY: &str = "documents";

/// Key under which the settings profile is stored.
pub const SETTINGS_KEY: &str = "settings";

/// Handle for the `kv_store` table.
///
/// Cheap to clone; holds only the pool.
#[derive(Debug, Clone)]
pub struct KvStore {
    pool: SqlitePool,
}

impl KvStore {
    /// Creates a new store handle over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        KvStore { pool }
    }

    // =========================================================================
    // Raw key/value access
    // =========================================================================

    /// Reads the raw value under a key, `None` when absent.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    /// Writes a value under a key, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    /// Deletes a key. Returns whether a row existed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Typed collections
    // =========================================================================

    /// Loads the full document collection.
    ///
    /// A missing key means a fresh install: returns an empty vec, not
    /// an error.
    pub async fn load_documents(&self) -> DbResult<Vec<Document>> {
        match self.get(DOCUMENTS_KEY).await? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| DbError::corrupt(DOCUMENTS_KEY, e))
            }
            None => Ok(Vec::new()),
        }
    }

    /// Persists the full document collection.
    pub async fn save_documents(&self, documents: &[Document]) -> DbResult<()> {
        let json =
            serde_json::to_string(documents).map_err(|e| DbError::corrupt(DOCUMENTS_KEY, e))?;
        self.put(DOCUMENTS_KEY, &json).await?;
        debug!(count = documents.len(), "Saved document collection");
        Ok(())
    }

    /// Loads the settings profile, defaults on a fresh install.
    pub async fn load_settings(&self) -> DbResult<SettingsProfile> {
        match self.get(SETTINGS_KEY).await? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| DbError::corrupt(SETTINGS_KEY, e))
            }
            None => Ok(SettingsProfile::default()),
        }
    }

    /// Persists the settings profile.
    pub async fn save_settings(&self, settings: &SettingsProfile) -> DbResult<()> {
        let json =
            serde_json::to_string(settings).map_err(|e| DbError::corrupt(SETTINGS_KEY, e))?;
        self.put(SETTINGS_KEY, &json).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
