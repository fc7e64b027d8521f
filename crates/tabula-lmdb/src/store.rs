use lmdb::{Environment, EnvironmentFlags, Transaction, WriteFlags};
use std::path::Path;
use std::time::Instant;
use tabula_core::{
    error::{OpenStage, Result, StoreError},
    observe,
    traits::TableStore,
    types::DeleteOutcome,
    StoreConfig, SyncMode,
};

use crate::duplicates::{collect_duplicates, remove_duplicate};
use crate::session::{storage_error, TableSession};

/// LMDB-backed table store
///
/// Owns the environment for its whole lifetime. Every operation resolves its
/// table and runs its own transaction through a [`TableSession`]; no table
/// handle or transaction outlives the call that created it.
///
/// The store is `Send + Sync`: share it behind an `Arc` and each thread's
/// calls get their own transactions. LMDB allows one writer at a time and any
/// number of concurrent readers.
pub struct LmdbTableStore {
    env: Option<Environment>,
    config: StoreConfig,
}

impl LmdbTableStore {
    /// Open or create a store at `path` with default limits
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(StoreConfig::new(path.as_ref()))
    }

    /// Open or create a store with custom configuration
    ///
    /// Fails with [`StoreError::Open`] naming the stage that failed. The
    /// engine releases a partially built environment itself, so a failed open
    /// leaves nothing behind to close.
    pub fn open_with_config(cfg: StoreConfig) -> Result<Self> {
        cfg.validate().map_err(|e| open_error(OpenStage::Configure, e))?;

        prepare_location(&cfg).map_err(|e| open_error(OpenStage::Prepare, e))?;

        let env = build_environment(&cfg).map_err(|e| open_error(OpenStage::Environment, e))?;

        tracing::info!(
            path = %cfg.path.display(),
            map_size = cfg.map_size,
            max_tables = cfg.max_tables,
            "store opened"
        );
        observe::record_lifecycle("open");

        Ok(Self {
            env: Some(env),
            config: cfg,
        })
    }

    /// Close the environment
    ///
    /// Safe to call more than once; later calls do nothing. Operations on a
    /// closed store fail with [`StoreError::Closed`].
    pub fn close(&mut self) {
        if let Some(env) = self.env.take() {
            drop(env);
            tracing::info!(path = %self.config.path.display(), "store closed");
            observe::record_lifecycle("close");
        }
    }

    pub fn is_open(&self) -> bool {
        self.env.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Flush the environment to disk
    ///
    /// Only needed with [`SyncMode::NoMetaSync`] or [`SyncMode::NoSync`].
    pub fn sync(&self) -> Result<()> {
        self.env()?.sync(true).map_err(storage_error)
    }

    fn env(&self) -> Result<&Environment> {
        self.env.as_ref().ok_or(StoreError::Closed)
    }
}

impl Drop for LmdbTableStore {
    fn drop(&mut self) {
        self.close();
    }
}

impl TableStore for LmdbTableStore {
    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        observed("get", || {
            TableSession::open(self.env()?, table)?.read(|txn, db| match txn.get(db, &key) {
                // Copy out: engine memory is gone once the transaction aborts
                Ok(bytes) => Ok(Some(bytes.to_vec())),
                Err(lmdb::Error::NotFound) => Ok(None),
                Err(e) => Err(storage_error(e)),
            })
        })
    }

    fn set(&self, table: &str, key: &[u8], value: &[u8]) -> Result<()> {
        observed("set", || {
            TableSession::create(self.env()?, table)?.write(|txn, db| {
                txn.put(db, &key, &value, WriteFlags::empty()).map_err(|e| {
                    tracing::error!(table, key_len = key.len(), value_len = value.len(), error = %e, "put failed");
                    storage_error(e)
                })
            })
        })
    }

    fn delete(&self, table: &str, key: &[u8]) -> Result<DeleteOutcome> {
        observed("delete", || {
            TableSession::create(self.env()?, table)?
                .write(|txn, db| delete_outcome(txn.del(db, &key, None)))
        })
    }

    fn delete_value(&self, table: &str, key: &[u8], value: &[u8]) -> Result<DeleteOutcome> {
        observed("delete_value", || {
            TableSession::create(self.env()?, table)?
                .write(|txn, db| remove_duplicate(txn, db, key, value))
        })
    }

    fn replace(&self, table: &str, key: &[u8], value: &[u8]) -> Result<()> {
        observed("replace", || {
            TableSession::create(self.env()?, table)?.write(|txn, db| {
                delete_outcome(txn.del(db, &key, None))?;
                txn.put(db, &key, &value, WriteFlags::empty())
                    .map_err(storage_error)
            })
        })
    }

    fn try_get_all(&self, table: &str, key: &[u8]) -> Result<Vec<Vec<u8>>> {
        let values = observed("get_all", || {
            TableSession::open(self.env()?, table)?.read(|txn, db| collect_duplicates(txn, db, key))
        })?;
        tracing::debug!(table, count = values.len(), "collected duplicates");
        observe::record_duplicates(values.len());
        Ok(values)
    }
}

/// Map a delete result, treating "nothing matched" as a committed no-op
fn delete_outcome(result: lmdb::Result<()>) -> Result<DeleteOutcome> {
    match result {
        Ok(()) => Ok(DeleteOutcome::Deleted),
        Err(lmdb::Error::NotFound) => Ok(DeleteOutcome::NotFound),
        Err(e) => Err(storage_error(e)),
    }
}

fn observed<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let result = f();
    observe::record_operation(op, start.elapsed(), result.is_ok());
    if let Err(e) = &result {
        tracing::debug!(op, error = %e, "operation failed");
    }
    result
}

fn open_error(stage: OpenStage, e: impl std::fmt::Display) -> StoreError {
    tracing::error!(%stage, error = %e, "failed to open store");
    StoreError::Open {
        stage,
        message: e.to_string(),
    }
}

/// Create the directory that will hold the environment
fn prepare_location(cfg: &StoreConfig) -> Result<()> {
    if cfg.no_sub_dir {
        if let Some(parent) = cfg.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    } else {
        std::fs::create_dir_all(&cfg.path)?;
    }
    Ok(())
}

/// Create, size and open the LMDB environment
fn build_environment(cfg: &StoreConfig) -> lmdb::Result<Environment> {
    let mut builder = Environment::new();
    builder.set_map_size(cfg.map_size);
    builder.set_max_dbs(cfg.max_tables);
    builder.set_max_readers(cfg.max_readers);

    let mut flags = EnvironmentFlags::empty();
    if cfg.no_sub_dir {
        flags.insert(EnvironmentFlags::NO_SUB_DIR);
    }
    if cfg.write_map {
        flags.insert(EnvironmentFlags::WRITE_MAP);
    }
    match cfg.sync_mode {
        SyncMode::Full => {}
        SyncMode::NoMetaSync => flags.insert(EnvironmentFlags::NO_META_SYNC),
        SyncMode::NoSync => flags.insert(EnvironmentFlags::NO_SYNC),
    }
    builder.set_flags(flags);

    #[cfg(unix)]
    {
        builder.open_with_permissions(&cfg.path, cfg.file_mode as _)
    }
    #[cfg(not(unix))]
    {
        builder.open(&cfg.path)
    }
}
