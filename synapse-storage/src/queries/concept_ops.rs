//! concept_nodes.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use synapse_core::errors::SynapseResult;
use synapse_core::models::ConceptNode;

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

pub fn upsert(conn: &Connection, name: &str) -> SynapseResult<()> {
    let now = fmt_ts(&Utc::now());
    conn.execute(
        "INSERT INTO concept_nodes (name, mention_count, first_seen, last_seen)
         VALUES (?1, 1, ?2, ?2)
         ON CONFLICT(name) DO UPDATE SET
             mention_count = mention_count + 1,
             last_seen = excluded.last_seen",
        params![name, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get(conn: &Connection, name: &str) -> SynapseResult<Option<ConceptNode>> {
    let raw = conn
        .query_row(
            "SELECT name, mention_count, first_seen, last_seen FROM concept_nodes WHERE name = ?1",
            params![name],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    match raw {
        Some((name, mention_count, first_seen, last_seen)) => Ok(Some(ConceptNode {
            name,
            mention_count: mention_count as u64,
            first_seen: parse_ts(&first_seen)?,
            last_seen: parse_ts(&last_seen)?,
        })),
        None => Ok(None),
    }
}

/// Exact prefix match; `substr` avoids LIKE wildcard escaping.
pub fn with_prefix(conn: &Connection, prefix: &str) -> SynapseResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name FROM concept_nodes
             WHERE substr(name, 1, length(?1)) = ?1
             ORDER BY name",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![prefix], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count(conn: &Connection) -> SynapseResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM concept_nodes", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}
