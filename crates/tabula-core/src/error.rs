use std::fmt;
use std::io;
use thiserror::Error;

/// Setup step that failed while opening a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStage {
    /// Creating the directory that holds the environment file
    Prepare,
    /// Validating map size, table count and reader limits
    Configure,
    /// Creating, sizing and opening the engine environment
    Environment,
}

impl fmt::Display for OpenStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpenStage::Prepare => "prepare",
            OpenStage::Configure => "configure",
            OpenStage::Environment => "environment",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to open store ({stage} stage): {message}")]
    Open { stage: OpenStage, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Table error on '{table}': {message}")]
    Table { table: String, message: String },

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Store is closed")]
    Closed,

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Stage at which opening failed, if this is an open error
    pub fn open_stage(&self) -> Option<OpenStage> {
        match self {
            StoreError::Open { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// True when the named table has never been created
    pub fn is_table_not_found(&self) -> bool {
        matches!(self, StoreError::TableNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_reports_stage() {
        let err = StoreError::Open {
            stage: OpenStage::Configure,
            message: "map_size must be positive".into(),
        };
        assert_eq!(err.open_stage(), Some(OpenStage::Configure));
        assert_eq!(
            err.to_string(),
            "Failed to open store (configure stage): map_size must be positive"
        );
        assert!(StoreError::Closed.open_stage().is_none());
    }

    #[test]
    fn test_anyhow_converts_to_other() {
        let err: StoreError = anyhow::anyhow!("application failure").into();
        assert!(matches!(err, StoreError::Other(_)));
        assert!(!err.is_table_not_found());
        assert!(StoreError::TableNotFound("data".into()).is_table_not_found());
    }
}
