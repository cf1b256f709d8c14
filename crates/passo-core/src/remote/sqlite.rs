//! SQLite-backed remote store.
//!
//! A shared database file stands in for the sync service: every device that
//! points at the same file sees the same records. Queries run synchronously
//! under a mutex; the async trait surface matches network backends.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode};
use tracing::debug;

use super::row::CredentialRow;
use super::traits::{RemoteCredential, RemoteStore};
use crate::error::{PassoError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS credentials (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    website TEXT NOT NULL,
    login TEXT NOT NULL,
    encrypted_secret TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_credentials_owner_created
    ON credentials (owner_id, created_at DESC);
";

/// Remote store kept in a SQLite database.
pub struct SqliteRemoteStore {
    conn: Mutex<Connection>,
}

impl SqliteRemoteStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `PassoError::BackendUnavailable` if the database cannot be
    /// opened or initialized.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            PassoError::BackendUnavailable(format!(
                "Cannot open remote database {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PassoError::BackendUnavailable(format!("SQLite error: {}", e)))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| PassoError::BackendUnavailable(format!("Schema setup failed: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn sqlite_error(err: rusqlite::Error) -> PassoError {
        match err.sqlite_error_code() {
            // The database file itself cannot be used right now.
            Some(ErrorCode::DatabaseBusy)
            | Some(ErrorCode::DatabaseLocked)
            | Some(ErrorCode::CannotOpen)
            | Some(ErrorCode::SystemIoFailure)
            | Some(ErrorCode::ReadOnly)
            | Some(ErrorCode::NotADatabase)
            | Some(ErrorCode::DatabaseCorrupt) => {
                PassoError::BackendUnavailable(format!("SQLite error: {}", err))
            }
            _ => PassoError::RemoteOperation(format!("SQLite error: {}", err)),
        }
    }

    fn timestamp(value: &DateTime<Utc>) -> String {
        // Fixed-width UTC text so that string order equals time order.
        value.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| PassoError::BackendUnavailable("Remote store lock poisoned".to_string()))?;
        f(&conn)
    }
}

#[async_trait]
impl RemoteStore for SqliteRemoteStore {
    async fn insert(&self, record: &RemoteCredential) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO credentials
                    (id, owner_id, website, login, encrypted_secret, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.owner_id,
                    record.website,
                    record.login,
                    record.encrypted_secret,
                    Self::timestamp(&record.created_at),
                    Self::timestamp(&record.updated_at),
                ],
            )
            .map_err(Self::sqlite_error)?;
            debug!(id = %record.id, "remote insert");
            Ok(())
        })
    }

    async fn update(&self, record: &RemoteCredential) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE credentials
                     SET website = ?1, login = ?2, encrypted_secret = ?3, updated_at = ?4
                     WHERE id = ?5 AND owner_id = ?6",
                    params![
                        record.website,
                        record.login,
                        record.encrypted_secret,
                        Self::timestamp(&record.updated_at),
                        record.id,
                        record.owner_id,
                    ],
                )
                .map_err(Self::sqlite_error)?;
            if changed == 0 {
                return Err(PassoError::RemoteOperation(format!(
                    "No remote record {} for this account",
                    record.id
                )));
            }
            debug!(id = %record.id, "remote update");
            Ok(())
        })
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM credentials WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id],
            )
            .map_err(Self::sqlite_error)?;
            debug!(id, "remote delete");
            Ok(())
        })
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<RemoteCredential>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, owner_id, website, login, encrypted_secret, created_at, updated_at
                     FROM credentials
                     WHERE owner_id = ?1
                     ORDER BY created_at DESC, rowid DESC",
                )
                .map_err(Self::sqlite_error)?;
            let rows = stmt
                .query_map(params![owner_id], CredentialRow::from_sql)
                .map_err(Self::sqlite_error)?;

            let mut credentials = Vec::new();
            for row in rows {
                let row = row.map_err(Self::sqlite_error)?;
                credentials.push(RemoteCredential::try_from(row)?);
            }
            Ok(credentials)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn credential(id: &str, owner: &str, minute: u32) -> RemoteCredential {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap();
        RemoteCredential {
            id: id.to_string(),
            owner_id: owner.to_string(),
            website: format!("{}.example", id),
            login: "me".to_string(),
            encrypted_secret: "opaque".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_scoped_to_owner() {
        let store = SqliteRemoteStore::open_in_memory().unwrap();
        store.insert(&credential("old", "alice", 1)).await.unwrap();
        store.insert(&credential("new", "alice", 9)).await.unwrap();
        store.insert(&credential("mid", "alice", 5)).await.unwrap();
        store.insert(&credential("other", "bob", 7)).await.unwrap();

        let ids: Vec<String> = store
            .list("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let store = SqliteRemoteStore::open_in_memory().unwrap();
        store.insert(&credential("a", "alice", 1)).await.unwrap();
        let result = store.insert(&credential("a", "alice", 2)).await;
        assert!(matches!(result, Err(PassoError::RemoteOperation(_))));
    }

    #[tokio::test]
    async fn test_update_requires_matching_owner() {
        let store = SqliteRemoteStore::open_in_memory().unwrap();
        store.insert(&credential("a", "alice", 1)).await.unwrap();

        let mut changed = credential("a", "mallory", 1);
        changed.website = "evil.example".to_string();
        assert!(matches!(
            store.update(&changed).await,
            Err(PassoError::RemoteOperation(_))
        ));

        changed.owner_id = "alice".to_string();
        store.update(&changed).await.unwrap();
        let listed = store.list("alice").await.unwrap();
        assert_eq!(listed[0].website, "evil.example");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = SqliteRemoteStore::open_in_memory().unwrap();
        store.insert(&credential("a", "alice", 1)).await.unwrap();

        store.delete("alice", "a").await.unwrap();
        store.delete("alice", "a").await.unwrap();
        assert!(store.list("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_database_is_shared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remote.sqlite");

        let first = SqliteRemoteStore::open(&path).unwrap();
        first.insert(&credential("a", "alice", 1)).await.unwrap();
        drop(first);

        let second = SqliteRemoteStore::open(&path).unwrap();
        assert_eq!(second.list("alice").await.unwrap().len(), 1);
    }

    #[test]
    fn test_open_in_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("remote.sqlite");
        assert!(matches!(
            SqliteRemoteStore::open(&path),
            Err(PassoError::BackendUnavailable(_))
        ));
    }

    #[test]
    fn test_io_level_failures_are_unavailable() {
        use rusqlite::ffi;

        let failure = |code| rusqlite::Error::SqliteFailure(ffi::Error::new(code), None);
        for code in [
            ffi::SQLITE_IOERR,
            ffi::SQLITE_READONLY,
            ffi::SQLITE_NOTADB,
            ffi::SQLITE_CORRUPT,
            ffi::SQLITE_BUSY,
        ] {
            assert!(matches!(
                SqliteRemoteStore::sqlite_error(failure(code)),
                PassoError::BackendUnavailable(_)
            ));
        }
        assert!(matches!(
            SqliteRemoteStore::sqlite_error(failure(ffi::SQLITE_CONSTRAINT)),
            PassoError::RemoteOperation(_)
        ));
    }
}
