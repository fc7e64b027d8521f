use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a table store
///
/// Map size and table count are fixed when the environment is opened and
/// cannot change without reopening it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the environment file (or directory when `no_sub_dir` is false)
    pub path: PathBuf,

    /// Maximum map size in bytes
    /// Default: 10MB
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Maximum number of named tables in the environment
    /// Default: 10
    #[serde(default = "default_max_tables")]
    pub max_tables: u32,

    /// Maximum number of concurrent readers (LMDB reader slots)
    /// Default: 126
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,

    /// Store the environment as a single file plus a `-lock` file
    /// instead of a directory (default: true)
    #[serde(default = "default_true")]
    pub no_sub_dir: bool,

    /// Use a writeable memory map (default: true)
    #[serde(default = "default_true")]
    pub write_map: bool,

    /// Sync mode for durability
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// Unix permission bits for newly created files (default: 0o644)
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Flush data and meta pages on every commit (default).
    #[default]
    Full,

    /// Skip syncing the meta page on commit.
    ///
    /// The last transaction may be lost on an OS crash, but the database
    /// stays consistent.
    NoMetaSync,

    /// Never flush on commit; the OS decides when pages reach disk.
    ///
    /// **WARNING**: a power failure can lose recent transactions or corrupt
    /// the file. Only use this for throwaway or test data, or call
    /// `sync()` explicitly.
    NoSync,
}

fn default_map_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_max_tables() -> u32 {
    10
}

fn default_max_readers() -> u32 {
    126
}

fn default_true() -> bool {
    true
}

fn default_file_mode() -> u32 {
    0o644
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            map_size: default_map_size(),
            max_tables: default_max_tables(),
            max_readers: default_max_readers(),
            no_sub_dir: default_true(),
            write_map: default_true(),
            sync_mode: SyncMode::default(),
            file_mode: default_file_mode(),
        }
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults; only `path` is required.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            StoreError::Config(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_max_tables(mut self, max_tables: u32) -> Self {
        self.max_tables = max_tables;
        self
    }

    pub fn with_max_readers(mut self, max_readers: u32) -> Self {
        self.max_readers = max_readers;
        self
    }

    pub fn with_no_sub_dir(mut self, no_sub_dir: bool) -> Self {
        self.no_sub_dir = no_sub_dir;
        self
    }

    pub fn with_write_map(mut self, write_map: bool) -> Self {
        self.write_map = write_map;
        self
    }

    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    pub fn with_file_mode(mut self, file_mode: u32) -> Self {
        self.file_mode = file_mode;
        self
    }

    /// Check the limits that the engine would otherwise reject at open time
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::Config("path must not be empty".into()));
        }
        if self.map_size == 0 {
            return Err(StoreError::Config("map_size must be positive".into()));
        }
        if self.max_tables == 0 {
            return Err(StoreError::Config("max_tables must be positive".into()));
        }
        if self.max_readers == 0 {
            return Err(StoreError::Config("max_readers must be positive".into()));
        }
        Ok(())
    }
}
