//! long_term_facts. Level arrays are stored as JSON text.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use synapse_core::errors::SynapseResult;
use synapse_core::models::{FactType, LongTermFact};

use super::{fmt_ts, parse_ts, parse_ts_opt};
use crate::to_storage_err;

const COLUMNS: &str = "key, l1_value, l2_value, l3_value, weight, access_count, fact_type, \
                       created_at, updated_at, last_accessed";

pub fn upsert(conn: &Connection, fact: &LongTermFact) -> SynapseResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO long_term_facts ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(key) DO UPDATE SET
                 l1_value = excluded.l1_value,
                 l2_value = excluded.l2_value,
                 l3_value = excluded.l3_value,
                 weight = excluded.weight,
                 access_count = excluded.access_count,
                 fact_type = excluded.fact_type,
                 updated_at = excluded.updated_at,
                 last_accessed = excluded.last_accessed"
        ),
        params![
            fact.key,
            serde_json::to_string(&fact.l1_value)?,
            serde_json::to_string(&fact.l2_value)?,
            serde_json::to_string(&fact.l3_value)?,
            fact.weight,
            fact.access_count as i64,
            fact.fact_type.as_str(),
            fmt_ts(&fact.created_at),
            fmt_ts(&fact.updated_at),
            fact.last_accessed.as_ref().map(fmt_ts),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get(conn: &Connection, key: &str) -> SynapseResult<Option<LongTermFact>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM long_term_facts WHERE key = ?1"),
            params![key],
            row_to_raw,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(raw_to_fact).transpose()
}

pub fn all(conn: &Connection) -> SynapseResult<Vec<LongTermFact>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM long_term_facts ORDER BY key"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], row_to_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut facts = Vec::new();
    for row in rows {
        facts.push(raw_to_fact(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(facts)
}

pub fn record_access(conn: &Connection, keys: &[String]) -> SynapseResult<()> {
    let now = fmt_ts(&Utc::now());
    let mut stmt = conn
        .prepare_cached(
            "UPDATE long_term_facts
             SET access_count = access_count + 1, last_accessed = ?2
             WHERE key = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for key in keys {
        stmt.execute(params![key, now])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

pub fn count(conn: &Connection) -> SynapseResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM long_term_facts", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}

type RawFact = (
    String,
    String,
    String,
    String,
    f64,
    i64,
    String,
    String,
    String,
    Option<String>,
);

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFact> {
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
        row.get(9)?,
    ))
}

fn raw_to_fact(raw: RawFact) -> SynapseResult<LongTermFact> {
    let (key, l1, l2, l3, weight, access_count, fact_type, created_at, updated_at, last_accessed) =
        raw;
    Ok(LongTermFact {
        key,
        l1_value: serde_json::from_str(&l1)?,
        l2_value: serde_json::from_str(&l2)?,
        l3_value: serde_json::from_str(&l3)?,
        weight,
        access_count: access_count as u64,
        fact_type: fact_type.parse::<FactType>().map_err(to_storage_err)?,
        created_at: parse_ts(&created_at)?,
        updated_at: parse_ts(&updated_at)?,
        last_accessed: parse_ts_opt(last_accessed)?,
    })
}
