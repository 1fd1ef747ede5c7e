//! pending_facts.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use synapse_core::errors::SynapseResult;
use synapse_core::models::{FactStatus, PendingFact};

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str =
    "id, text, session_id, source, status, confidence_score, hier_key, created_at, updated_at";

pub fn insert(conn: &Connection, fact: &PendingFact) -> SynapseResult<()> {
    conn.execute(
        &format!("INSERT INTO pending_facts ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        params![
            fact.id,
            fact.text,
            fact.session_id,
            fact.source,
            fact.status.as_str(),
            fact.confidence_score,
            fact.hier_key,
            fmt_ts(&fact.created_at),
            fmt_ts(&fact.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> SynapseResult<Option<PendingFact>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM pending_facts WHERE id = ?1"),
            params![id],
            row_to_raw,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(raw_to_fact).transpose()
}

/// Never-scored facts first, oldest first; then scored facts, least
/// recently scored first, so held facts rotate behind new ones.
pub fn with_status(
    conn: &Connection,
    statuses: &[FactStatus],
    limit: usize,
) -> SynapseResult<Vec<PendingFact>> {
    if statuses.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; statuses.len()].join(", ");
    let sql = format!(
        "SELECT {COLUMNS} FROM pending_facts
         WHERE status IN ({placeholders})
         ORDER BY confidence_score IS NOT NULL ASC,
                  CASE WHEN confidence_score IS NULL THEN created_at ELSE updated_at END ASC,
                  rowid ASC
         LIMIT {limit}"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(statuses.iter().map(|s| s.as_str())), row_to_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut facts = Vec::new();
    for row in rows {
        facts.push(raw_to_fact(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(facts)
}

/// Persist the mutable fields: status, score, key, updated_at.
pub fn update(conn: &Connection, fact: &PendingFact) -> SynapseResult<usize> {
    conn.execute(
        "UPDATE pending_facts
         SET status = ?2, confidence_score = ?3, hier_key = ?4, updated_at = ?5
         WHERE id = ?1",
        params![
            fact.id,
            fact.status.as_str(),
            fact.confidence_score,
            fact.hier_key,
            fmt_ts(&fact.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn delete_settled(conn: &Connection, session_id: &str) -> SynapseResult<usize> {
    conn.execute(
        "DELETE FROM pending_facts
         WHERE session_id = ?1 AND status IN ('consolidated', 'rejected')",
        params![session_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count(conn: &Connection) -> SynapseResult<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM pending_facts WHERE status IN ('pending', 'approved', 'pending_review')",
        [],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}

type RawPending = (
    String,
    String,
    String,
    String,
    String,
    Option<f64>,
    Option<String>,
    String,
    String,
);

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPending> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn raw_to_fact(raw: RawPending) -> SynapseResult<PendingFact> {
    let (id, text, session_id, source, status, confidence_score, hier_key, created_at, updated_at) =
        raw;
    Ok(PendingFact {
        id,
        text,
        session_id,
        source,
        status: status.parse::<FactStatus>().map_err(to_storage_err)?,
        confidence_score,
        hier_key,
        created_at: parse_ts(&created_at)?,
        updated_at: parse_ts(&updated_at)?,
    })
}
