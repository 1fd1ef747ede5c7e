//! v002: pending_facts, long_term_facts.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pending_facts (
            id               TEXT PRIMARY KEY,
            text             TEXT NOT NULL,
            session_id       TEXT NOT NULL,
            source           TEXT NOT NULL,
            status           TEXT NOT NULL DEFAULT 'pending',
            confidence_score REAL,
            hier_key         TEXT,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pending_status ON pending_facts(status, created_at);
        CREATE INDEX IF NOT EXISTS idx_pending_session ON pending_facts(session_id);

        CREATE TABLE IF NOT EXISTS long_term_facts (
            key           TEXT PRIMARY KEY,
            l1_value      TEXT NOT NULL DEFAULT '[]',
            l2_value      TEXT NOT NULL DEFAULT '[]',
            l3_value      TEXT NOT NULL DEFAULT '[]',
            weight        REAL NOT NULL DEFAULT 0.0,
            access_count  INTEGER NOT NULL DEFAULT 0,
            fact_type     TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            last_accessed TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_facts_type ON long_term_facts(fact_type);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
