//! # Storage Repository
//!
//! Session-scoped key/value storage. The cart engine keeps its serialized
//! snapshot here under a single key; values are opaque bytes.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the `session_storage` table.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.storage();
/// repo.write("session-1", "stockcart:cart", b"[]").await?;
/// assert_eq!(repo.read("session-1", "stockcart:cart").await?, Some(b"[]".to_vec()));
/// ```
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Reads the value stored under `key` for `session_id`.
    ///
    /// ## Returns
    /// * `Ok(Some(bytes))` - Value present
    /// * `Ok(None)` - Nothing stored yet
    pub async fn read(&self, session_id: &str, key: &str) -> DbResult<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> = sqlx::query_scalar(
            r#"
            SELECT value
            FROM session_storage
            WHERE session_id = ?1 AND key = ?2
            "#,
        )
        .bind(session_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        debug!(
            session_id = %session_id,
            key = %key,
            found = value.is_some(),
            "Read session value"
        );
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn write(&self, session_id: &str, key: &str, value: &[u8]) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO session_storage (session_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (session_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(session_id)
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(
            session_id = %session_id,
            key = %key,
            bytes = value.len(),
            "Wrote session value"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_read_missing_key() {
        let db = db().await;
        assert_eq!(db.storage().read("s1", "stockcart:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_overwrite() {
        let db = db().await;
        let repo = db.storage();

        repo.write("s1", "stockcart:cart", b"[]").await.unwrap();
        repo.write("s1", "stockcart:cart", br#"[{"id":1}]"#).await.unwrap();

        let value = repo.read("s1", "stockcart:cart").await.unwrap();
        assert_eq!(value, Some(br#"[{"id":1}]"#.to_vec()));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let db = db().await;
        let repo = db.storage();

        repo.write("s1", "stockcart:cart", b"one").await.unwrap();
        repo.write("s2", "stockcart:cart", b"two").await.unwrap();

        assert_eq!(repo.read("s1", "stockcart:cart").await.unwrap(), Some(b"one".to_vec()));
        assert_eq!(repo.read("s2", "stockcart:cart").await.unwrap(), Some(b"two".to_vec()));
        assert_eq!(repo.read("s1", "other").await.unwrap(), None);
    }
}
