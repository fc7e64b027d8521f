//! Tabula Prelude
//!
//! Import this to get all commonly used types and traits:
//!
//! ```
//! use tabula::prelude::*;
//! ```

// Core types
pub use crate::{DeleteOutcome, OpenStage, Result, StoreError, UnixTimestamp};

// Configs
pub use crate::{StoreConfig, SyncMode};

// Traits
pub use crate::TableStore;

// Implementations
pub use crate::LmdbTableStore;

pub use std::sync::Arc;
