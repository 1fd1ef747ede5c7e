//! Schema migrations tracked with `PRAGMA user_version`.

mod v001_graph_tables;
mod v002_fact_tables;
mod v003_history_events;

use rusqlite::Connection;

use synapse_core::errors::{StorageError, SynapseResult};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> SynapseResult<()>;

const MIGRATIONS: [(u32, MigrationFn); 3] = [
    (1, v001_graph_tables::migrate),
    (2, v002_fact_tables::migrate),
    (3, v003_history_events::migrate),
];

/// Schema version after all migrations ran.
pub const LATEST_VERSION: u32 = 3;

pub fn current_version(conn: &Connection) -> SynapseResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the current `user_version`, each in its
/// own transaction. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> SynapseResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied migration");
        applied += 1;
    }
    Ok(applied)
}
