//! cooccurrence counters.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use synapse_core::errors::SynapseResult;

use super::fmt_ts;
use crate::to_storage_err;

pub fn increment(conn: &Connection, a: &str, b: &str) -> SynapseResult<u64> {
    let now = fmt_ts(&Utc::now());
    conn.query_row(
        "INSERT INTO cooccurrence (key_a, key_b, count, last_seen)
         VALUES (?1, ?2, 1, ?3)
         ON CONFLICT(key_a, key_b) DO UPDATE SET
             count = count + 1,
             last_seen = excluded.last_seen
         RETURNING count",
        params![a, b, now],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as u64)
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count(conn: &Connection, a: &str, b: &str) -> SynapseResult<u64> {
    conn.query_row(
        "SELECT count FROM cooccurrence WHERE key_a = ?1 AND key_b = ?2",
        params![a, b],
        |row| row.get::<_, i64>(0),
    )
    .optional()
    .map(|n| n.unwrap_or(0) as u64)
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn pair_count(conn: &Connection) -> SynapseResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM cooccurrence", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}
