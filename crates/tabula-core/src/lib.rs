//! Tabula Core: configuration, errors and traits for the Tabula table store
//!
//! A table store is a set of named, duplicate-sorted tables inside one
//! embedded environment. This crate defines:
//! - `StoreConfig`: environment limits fixed at open time
//! - `StoreError`: the error taxonomy shared by every backend
//! - `TableStore`: per-table get/set/delete, duplicate enumeration and
//!   timestamp fields
//! - Timestamp encoding (4 native-endian bytes)

pub mod config;
pub mod error;
pub mod observe;
pub mod traits;
pub mod types;

pub use config::{StoreConfig, SyncMode};
pub use error::{OpenStage, Result, StoreError};
pub use traits::TableStore;
pub use types::{
    decode_timestamp, encode_timestamp, unix_now, DeleteOutcome, UnixTimestamp, TIMESTAMP_LEN,
};
