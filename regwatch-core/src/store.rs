use crate::error::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Persistent get/set store for small JSON values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>>;
    fn set(&self, key: &str, value: &serde_json::Value) -> StoreResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &serde_json::Value) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::KeyValueStore;
    use crate::error::{StoreError, StoreResult};
    use rusqlite::{params, Connection, OptionalExtension};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    pub struct SqliteStore {
        db_path: Arc<PathBuf>,
    }

    impl SqliteStore {
        pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
            let db_path = path.as_ref().to_path_buf();
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let conn = Connection::open(&db_path)?;
            conn.execute_batch(
                "
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
                CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                ",
            )?;
            tracing::info!(path = %db_path.display(), "opened key-value store");

            Ok(Self {
                db_path: Arc::new(db_path),
            })
        }

        fn connect(&self) -> StoreResult<Connection> {
            Ok(Connection::open(&*self.db_path)?)
        }
    }

    impl KeyValueStore for SqliteStore {
        fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
            let conn = self.connect()?;
            let raw: Option<String> = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
                .optional()?;
            raw.map(|s| serde_json::from_str(&s).map_err(StoreError::from))
                .transpose()
        }

        fn set(&self, key: &str, value: &serde_json::Value) -> StoreResult<()> {
            let conn = self.connect()?;
            let raw = serde_json::to_string(value)?;
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, raw],
            )?;
            Ok(())
        }
    }
}
