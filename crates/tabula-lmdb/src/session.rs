//! Per-operation table sessions
//!
//! A `TableSession` resolves one named table, runs a single transaction
//! against it and tears everything down before returning:
//!
//! `resolve table → begin txn → action → commit | abort`
//!
//! The table is resolved through the environment (`Environment::open_db` /
//! `Environment::create_db`), which serializes handle opens behind the
//! environment's own mutex. Resolution therefore happens before the action's
//! transaction begins: a write transaction already holding the LMDB writer
//! lock would block a nested `create_db`.

use lmdb::{Database, DatabaseFlags, Environment, RoTransaction, RwTransaction, Transaction};
use tabula_core::error::{Result, StoreError};

/// Flags for every table: several values per key, sorted by value bytes
pub const TABLE_FLAGS: DatabaseFlags = DatabaseFlags::DUP_SORT;

/// Ephemeral table handle scoped to one operation
///
/// Consumed by [`read`](Self::read) or [`write`](Self::write). The LMDB handle
/// itself is not closed: handles stay valid until the environment closes, and
/// closing one would race other threads using the same table.
pub struct TableSession<'env> {
    env: &'env Environment,
    db: Database,
}

impl<'env> TableSession<'env> {
    /// Resolve an existing table without creating it
    ///
    /// Returns [`StoreError::TableNotFound`] if the table was never created.
    pub fn open(env: &'env Environment, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        let db = env.open_db(Some(table)).map_err(|e| match e {
            lmdb::Error::NotFound => StoreError::TableNotFound(table.to_string()),
            e => table_error(table, e),
        })?;
        Ok(Self { env, db })
    }

    /// Resolve a table, creating it as duplicate-sorted if absent
    ///
    /// Creation commits on its own, so the table persists even if the
    /// action that follows fails.
    pub fn create(env: &'env Environment, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        let db = env
            .create_db(Some(table), TABLE_FLAGS)
            .map_err(|e| table_error(table, e))?;
        Ok(Self { env, db })
    }

    /// Run `f` in a read-only transaction
    ///
    /// The transaction is always aborted. Anything `f` returns must be owned:
    /// engine memory is only valid until the abort.
    pub fn read<T, F>(self, f: F) -> Result<T>
    where
        F: FnOnce(&RoTransaction<'env>, Database) -> Result<T>,
    {
        let txn = self.env.begin_ro_txn().map_err(transaction_error)?;
        let result = f(&txn, self.db);
        txn.abort();
        result
    }

    /// Run `f` in a write transaction
    ///
    /// Commits if `f` succeeds, aborts otherwise. A failed commit is
    /// reported as [`StoreError::Transaction`].
    pub fn write<T, F>(self, f: F) -> Result<T>
    where
        F: FnOnce(&mut RwTransaction<'env>, Database) -> Result<T>,
    {
        let mut txn = self.env.begin_rw_txn().map_err(transaction_error)?;
        match f(&mut txn, self.db) {
            Ok(value) => {
                txn.commit().map_err(transaction_error)?;
                Ok(value)
            }
            Err(e) => {
                txn.abort();
                Err(e)
            }
        }
    }
}

/// Reject names LMDB cannot use as a sub-database identifier
pub fn validate_table_name(table: &str) -> Result<()> {
    if table.is_empty() || table.contains('\0') {
        return Err(StoreError::InvalidTableName(table.to_string()));
    }
    Ok(())
}

pub(crate) fn transaction_error(e: lmdb::Error) -> StoreError {
    StoreError::Transaction(e.to_string())
}

pub(crate) fn table_error(table: &str, e: lmdb::Error) -> StoreError {
    StoreError::Table {
        table: table.to_string(),
        message: e.to_string(),
    }
}

pub(crate) fn storage_error(e: lmdb::Error) -> StoreError {
    StoreError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lmdb::{EnvironmentFlags, WriteFlags};
    use tempfile::TempDir;

    fn create_test_env() -> (TempDir, Environment) {
        let temp_dir = TempDir::new().unwrap();
        let mut builder = Environment::new();
        builder.set_max_dbs(4);
        builder.set_flags(EnvironmentFlags::empty());
        let env = builder.open(temp_dir.path()).unwrap();
        (temp_dir, env)
    }

    #[test]
    fn test_open_missing_table() {
        let (_temp_dir, env) = create_test_env();
        let err = TableSession::open(&env, "data").err().unwrap();
        assert!(matches!(err, StoreError::TableNotFound(ref t) if t == "data"));
    }

    #[test]
    fn test_invalid_table_names() {
        let (_temp_dir, env) = create_test_env();
        assert!(matches!(
            TableSession::create(&env, "").err().unwrap(),
            StoreError::InvalidTableName(_)
        ));
        assert!(matches!(
            TableSession::open(&env, "da\0ta").err().unwrap(),
            StoreError::InvalidTableName(_)
        ));
    }

    #[test]
    fn test_write_commits_and_read_sees_it() {
        let (_temp_dir, env) = create_test_env();

        TableSession::create(&env, "data")
            .unwrap()
            .write(|txn, db| {
                txn.put(db, b"speed", b"200.24", WriteFlags::empty())
                    .map_err(storage_error)
            })
            .unwrap();

        let value = TableSession::open(&env, "data")
            .unwrap()
            .read(|txn, db| txn.get(db, b"speed").map(|v| v.to_vec()).map_err(storage_error))
            .unwrap();
        assert_eq!(value, b"200.24".to_vec());
    }

    #[test]
    fn test_failed_write_aborts_but_keeps_table() {
        let (_temp_dir, env) = create_test_env();

        let result: Result<()> = TableSession::create(&env, "orders").unwrap().write(|txn, db| {
            txn.put(db, b"order-1", b"pending", WriteFlags::empty())
                .map_err(storage_error)?;
            Err(StoreError::Storage("rejected".into()))
        });
        assert!(matches!(result, Err(StoreError::Storage(_))));

        // Table creation committed on its own; the put did not
        let found = TableSession::open(&env, "orders")
            .unwrap()
            .read(|txn, db| Ok(txn.get(db, b"order-1").is_ok()))
            .unwrap();
        assert!(!found);
    }

    #[test]
    fn test_created_tables_are_dup_sorted() {
        let (_temp_dir, env) = create_test_env();
        let flags = TableSession::create(&env, "data")
            .unwrap()
            .read(|txn, db| txn.db_flags(db).map_err(storage_error))
            .unwrap();
        assert!(flags.contains(DatabaseFlags::DUP_SORT));
    }

    #[test]
    fn test_repeated_sessions_reuse_table_slot() {
        let temp_dir = TempDir::new().unwrap();
        let mut builder = Environment::new();
        builder.set_max_dbs(1);
        let env = builder.open(temp_dir.path()).unwrap();

        for i in 0..50u32 {
            TableSession::create(&env, "data")
                .unwrap()
                .write(|txn, db| {
                    txn.put(db, b"k", &i.to_be_bytes(), WriteFlags::empty())
                        .map_err(storage_error)
                })
                .unwrap();
            TableSession::open(&env, "data").unwrap().read(|_, _| Ok(())).unwrap();
        }

        // The single slot is taken, so a second name is refused
        assert!(matches!(
            TableSession::create(&env, "other").err().unwrap(),
            StoreError::Table { .. }
        ));
    }
}
