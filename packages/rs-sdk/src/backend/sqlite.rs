use async_trait::async_trait;
use rusqlite::{params, Connection, TransactionBehavior};
use sqlmask_engine::{ColumnHashPair, MappingStore, StoreError};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS hashed_columns (\
     column_name TEXT PRIMARY KEY, \
     column_hash TEXT NOT NULL\
     )";

const UPSERT_SQL: &str = "INSERT INTO hashed_columns (column_name, column_hash) VALUES (?1, ?2) \
     ON CONFLICT (column_name) DO NOTHING";

const LIST_SQL: &str = "SELECT column_name, column_hash FROM hashed_columns";

/// Mapping store backed by a single SQLite table keyed on `column_name`.
///
/// Several stores may point at the same file; the primary key plus
/// `ON CONFLICT DO NOTHING` keeps exactly one row per name.
pub struct SqliteMappingStore {
    conn: Mutex<Connection>,
}

impl SqliteMappingStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(store_error)?;
        debug!(path = %path.display(), "opened sqlite mapping store");
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(store_error)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(BUSY_TIMEOUT).map_err(store_error)?;
        conn.execute(CREATE_TABLE_SQL, []).map_err(store_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait(?Send)]
impl MappingStore for SqliteMappingStore {
    async fn upsert_many(&self, pairs: &[ColumnHashPair]) -> Result<(), StoreError> {
        if pairs.is_empty() {
            return Ok(());
        }
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::new("sqlite mutex poisoned"))?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(store_error)?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare_cached(UPSERT_SQL).map_err(store_error)?;
            for pair in pairs {
                inserted += stmt
                    .execute(params![pair.column_name, pair.column_hash])
                    .map_err(store_error)?;
            }
        }
        tx.commit().map_err(store_error)?;

        debug!(
            pairs = pairs.len(),
            inserted, "upserted column hash mappings"
        );
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ColumnHashPair>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::new("sqlite mutex poisoned"))?;
        let mut stmt = conn.prepare(LIST_SQL).map_err(store_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ColumnHashPair::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                ))
            })
            .map_err(store_error)?;

        let mut pairs = Vec::new();
        for row in rows {
            pairs.push(row.map_err(store_error)?);
        }
        Ok(pairs)
    }
}

fn store_error(err: rusqlite::Error) -> StoreError {
    StoreError::new(err.to_string())
}
