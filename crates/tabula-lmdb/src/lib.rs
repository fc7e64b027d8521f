//! LMDB-backed table store
//!
//! Named, duplicate-sorted tables inside one LMDB environment, accessed one
//! short transaction at a time.
//!
//! Key features:
//! - Every operation resolves its table, runs one transaction and tears both
//!   down on every exit path (see [`session`])
//! - Values are copied out of engine memory before the transaction ends
//! - Cursor walk over all duplicates of a key
//! - Idempotent close; a failed open leaves nothing to release

pub mod duplicates;
pub mod session;
pub mod store;

pub use session::TableSession;
pub use store::LmdbTableStore;
