//! operational_events.

use rusqlite::{params, Connection};

use synapse_core::errors::SynapseResult;
use synapse_core::models::OperationalEvent;

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

pub fn insert(conn: &Connection, event: &OperationalEvent) -> SynapseResult<()> {
    conn.execute(
        "INSERT INTO operational_events (kind, payload, created_at) VALUES (?1, ?2, ?3)",
        params![
            event.kind,
            serde_json::to_string(&event.payload)?,
            fmt_ts(&event.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Newest first, optionally filtered by kind.
pub fn recent(
    conn: &Connection,
    kind: Option<&str>,
    limit: usize,
) -> SynapseResult<Vec<OperationalEvent>> {
    let mut stmt = conn
        .prepare(
            "SELECT kind, payload, created_at FROM operational_events
             WHERE ?1 IS NULL OR kind = ?1
             ORDER BY id DESC LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![kind, limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut events = Vec::new();
    for row in rows {
        let (kind, payload, created_at) = row.map_err(|e| to_storage_err(e.to_string()))?;
        events.push(OperationalEvent {
            kind,
            payload: serde_json::from_str(&payload)?,
            created_at: parse_ts(&created_at)?,
        });
    }
    Ok(events)
}
