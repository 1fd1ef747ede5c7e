//! v003: consolidation_history, operational_events.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS consolidation_history (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            fact_text   TEXT NOT NULL,
            from_level  INTEGER NOT NULL,
            to_level    INTEGER NOT NULL,
            permanence  REAL NOT NULL,
            relevance   REAL NOT NULL,
            identity    REAL NOT NULL,
            total       REAL NOT NULL,
            reason      TEXT NOT NULL,
            session_id  TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_session ON consolidation_history(session_id);

        CREATE TABLE IF NOT EXISTS operational_events (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            kind       TEXT NOT NULL,
            payload    TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_kind ON operational_events(kind, id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
