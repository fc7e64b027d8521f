//! Tabula: a minimal transactional access layer over LMDB tables
//!
//! Tabula stores byte values under byte keys in named, duplicate-sorted
//! tables. Each call is its own short transaction:
//! - **Point operations**: `get`, `set`, `delete`, `replace`
//! - **Duplicates**: `get_all` returns every value stored under a key
//! - **Timestamp fields**: `set_timestamp` / `get_timestamp` store a
//!   4-byte Unix time
//!
//! # Quick Start
//!
//! ```no_run
//! use tabula::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let store = LmdbTableStore::open("./pidata.db")?;
//!
//! store.set("data", b"PME.Engine Speed", b"200.24")?;
//! assert_eq!(store.get("data", b"PME.Engine Speed")?, Some(b"200.24".to_vec()));
//!
//! store.set_timestamp("config", b"config-ts")?;
//! let updated_at = store.get_timestamp("config", b"config-ts");
//! # let _ = updated_at;
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub use tabula_core::{
    config::{StoreConfig, SyncMode},
    error::{OpenStage, Result, StoreError},
    traits::TableStore,
    types::{decode_timestamp, encode_timestamp, unix_now, DeleteOutcome, UnixTimestamp},
    TIMESTAMP_LEN,
};

pub use tabula_lmdb::{LmdbTableStore, TableSession};
