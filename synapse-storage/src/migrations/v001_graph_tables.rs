//! v001: concept_nodes, concept_links, cooccurrence.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS concept_nodes (
            name          TEXT PRIMARY KEY,
            mention_count INTEGER NOT NULL DEFAULT 1,
            first_seen    TEXT NOT NULL,
            last_seen     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS concept_links (
            concept_a   TEXT NOT NULL,
            concept_b   TEXT NOT NULL,
            strength    REAL NOT NULL,
            fire_count  INTEGER NOT NULL DEFAULT 1,
            last_fired  TEXT NOT NULL,
            PRIMARY KEY (concept_a, concept_b),
            CHECK (concept_a < concept_b),
            CHECK (strength >= 0.0 AND strength <= 1.0)
        );

        CREATE INDEX IF NOT EXISTS idx_links_b ON concept_links(concept_b);
        CREATE INDEX IF NOT EXISTS idx_links_strength ON concept_links(strength);

        CREATE TABLE IF NOT EXISTS cooccurrence (
            key_a     TEXT NOT NULL,
            key_b     TEXT NOT NULL,
            count     INTEGER NOT NULL DEFAULT 1,
            last_seen TEXT NOT NULL,
            PRIMARY KEY (key_a, key_b),
            CHECK (key_a < key_b)
        );

        CREATE INDEX IF NOT EXISTS idx_cooccurrence_b ON cooccurrence(key_b);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
