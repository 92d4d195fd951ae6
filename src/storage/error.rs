//! Store error taxonomy

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the table and shard stores.
///
/// Failures are never retried; every operation reports synchronously to its
/// immediate caller. A decode failure means the table file on disk is
/// malformed and every subsequent read will fail until the file is repaired
/// or the table is cleared.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure on table {table}: {source}")]
    Io {
        table: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode table {table}: {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode table {table}: {source}")]
    Encode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Entity with key {key} not found in table {table}")]
    NotFound { table: String, key: String },

    #[error("Entity limit reached ({limit}) for table {table}")]
    CapacityExceeded { table: String, limit: usize },
}

impl StoreError {
    pub(crate) fn io(table: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            table: table.into(),
            source,
        }
    }

    /// True for the expected key-absent outcome, as opposed to a systemic
    /// failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
