use crate::error::{Result, StoreError};
use crate::types::{decode_timestamp, encode_timestamp, unix_now, DeleteOutcome, UnixTimestamp};

/// Table store: named, duplicate-sorted tables of byte keys and values
///
/// Every method is one self-contained transaction. Nothing is atomic across
/// two calls, so a read followed by a write from the caller can interleave
/// with writers on other threads.
///
/// Tables allow several values per key. `get` returns the first value in the
/// engine's sort order; use `get_all` to see every value, and `replace` when
/// a key must hold exactly one.
pub trait TableStore: Send + Sync {
    /// Read the first value stored under `key`
    ///
    /// Returns `Ok(None)` if the key is absent and
    /// [`StoreError::TableNotFound`] if the table was never created.
    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Add `value` under `key`, creating the table if needed
    fn set(&self, table: &str, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove every value stored under `key`, creating the table if needed
    fn delete(&self, table: &str, key: &[u8]) -> Result<DeleteOutcome>;

    /// Remove one value stored under `key`, leaving its other values
    fn delete_value(&self, table: &str, key: &[u8], value: &[u8]) -> Result<DeleteOutcome>;

    /// Make `value` the only value stored under `key`
    fn replace(&self, table: &str, key: &[u8], value: &[u8]) -> Result<()>;

    /// Read every value stored under `key`, surfacing failures
    ///
    /// An absent key yields an empty vector. A missing table or an engine
    /// failure is an error.
    fn try_get_all(&self, table: &str, key: &[u8]) -> Result<Vec<Vec<u8>>>;

    /// Read every value stored under `key`
    ///
    /// Any failure (missing table, engine error) degrades to an empty
    /// vector. Use [`TableStore::try_get_all`] to tell the cases apart.
    fn get_all(&self, table: &str, key: &[u8]) -> Vec<Vec<u8>> {
        match self.try_get_all(table, key) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(table, key_len = key.len(), error = %e, "get_all failed, returning no values");
                Vec::new()
            }
        }
    }

    /// Check whether `key` has at least one value
    fn contains(&self, table: &str, key: &[u8]) -> Result<bool> {
        Ok(self.get(table, key)?.is_some())
    }

    /// Store the current Unix time under `key`
    ///
    /// Like any `set`, this adds a value rather than overwriting one.
    /// Returns the timestamp that was written.
    fn set_timestamp(&self, table: &str, key: &[u8]) -> Result<UnixTimestamp> {
        let now = unix_now();
        self.set(table, key, &encode_timestamp(now))?;
        Ok(now)
    }

    /// Read a timestamp, surfacing failures
    ///
    /// Returns `Ok(None)` for an absent key and a storage error if the stored
    /// value is not a timestamp.
    fn try_get_timestamp(&self, table: &str, key: &[u8]) -> Result<Option<UnixTimestamp>> {
        match self.get(table, key)? {
            Some(bytes) => decode_timestamp(&bytes).map(Some).ok_or_else(|| {
                StoreError::Storage(format!(
                    "value under key in table '{}' is {} bytes, not a timestamp",
                    table,
                    bytes.len()
                ))
            }),
            None => Ok(None),
        }
    }

    /// Read a timestamp
    ///
    /// Returns 0 when the read fails or the value is not exactly 4 bytes.
    /// A stored timestamp of 0 is indistinguishable from failure.
    fn get_timestamp(&self, table: &str, key: &[u8]) -> UnixTimestamp {
        match self.get(table, key) {
            Ok(Some(bytes)) => decode_timestamp(&bytes).unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                tracing::debug!(table, error = %e, "timestamp read failed");
                0
            }
        }
    }
}
