use lmdb::{Cursor, Database, RwTransaction, Transaction, WriteFlags};
use lmdb_sys::{MDB_GET_BOTH, MDB_NEXT_DUP, MDB_SET_KEY};
use tabula_core::error::Result;
use tabula_core::types::DeleteOutcome;

use crate::session::storage_error;

/// Collect every value stored under `key`, in duplicate-sort order
///
/// Positions a cursor on the exact key, then steps through its duplicates
/// only. Values are copied out and the cursor is closed before returning, so
/// the caller may end the transaction right away. An absent key yields an
/// empty vector.
pub fn collect_duplicates<T: Transaction>(
    txn: &T,
    db: Database,
    key: &[u8],
) -> Result<Vec<Vec<u8>>> {
    let cursor = txn.open_ro_cursor(db).map_err(storage_error)?;

    let mut values = Vec::new();
    let mut step = cursor.get(Some(key), None, MDB_SET_KEY);
    loop {
        match step {
            Ok((_, value)) => values.push(value.to_vec()),
            Err(lmdb::Error::NotFound) => break,
            Err(e) => return Err(storage_error(e)),
        }
        step = cursor.get(None, None, MDB_NEXT_DUP);
    }

    Ok(values)
}

/// Remove the single `(key, value)` pair, leaving other duplicates in place
///
/// The pair is located with an exact key and data match, then deleted at the
/// cursor. `RwTransaction::del` is not used with a data argument: `lmdb` 0.8
/// hands `mdb_del` a pointer to a temporary for it.
pub fn remove_duplicate(
    txn: &mut RwTransaction<'_>,
    db: Database,
    key: &[u8],
    value: &[u8],
) -> Result<DeleteOutcome> {
    let mut cursor = txn.open_rw_cursor(db).map_err(storage_error)?;
    match cursor.get(Some(key), Some(value), MDB_GET_BOTH) {
        Ok(_) => {}
        Err(lmdb::Error::NotFound) => return Ok(DeleteOutcome::NotFound),
        Err(e) => return Err(storage_error(e)),
    }
    cursor.del(WriteFlags::empty()).map_err(storage_error)?;
    Ok(DeleteOutcome::Deleted)
}
