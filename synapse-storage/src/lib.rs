//! # synapse-storage
//!
//! SQLite persistence: concept graph, pending and long-term facts,
//! consolidation history and operational events.
//! One write connection behind a mutex, a round-robin read pool, and
//! `PRAGMA user_version` migrations.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use synapse_core::errors::{StorageError, SynapseError};

/// Map a SQLite failure message into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> SynapseError {
    SynapseError::StorageError(StorageError::SqliteError { message })
}
