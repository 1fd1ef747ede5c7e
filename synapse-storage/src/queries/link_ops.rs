//! concept_links: Hebbian upsert, decay, neighbor queries.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use synapse_core::errors::SynapseResult;
use synapse_core::models::ConceptLink;

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

/// Insert at `rate` or apply `old + (1 - old) * rate`, capped at `cap`.
pub fn reinforce(conn: &Connection, a: &str, b: &str, rate: f64, cap: f64) -> SynapseResult<f64> {
    let now = fmt_ts(&Utc::now());
    conn.query_row(
        "INSERT INTO concept_links (concept_a, concept_b, strength, fire_count, last_fired)
         VALUES (?1, ?2, MIN(?3, ?4), 1, ?5)
         ON CONFLICT(concept_a, concept_b) DO UPDATE SET
             strength = MIN(strength + (1.0 - strength) * ?3, ?4),
             fire_count = fire_count + 1,
             last_fired = excluded.last_fired
         RETURNING strength",
        params![a, b, rate, cap, now],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Scale every strength, then prune. Caller provides the transaction.
pub fn decay(conn: &Connection, factor: f64, min_strength: f64) -> SynapseResult<usize> {
    conn.execute(
        "UPDATE concept_links SET strength = strength * ?1",
        params![factor],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "DELETE FROM concept_links WHERE strength < ?1",
        params![min_strength],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn get_link(conn: &Connection, a: &str, b: &str) -> SynapseResult<Option<ConceptLink>> {
    let row = conn
        .query_row(
            "SELECT concept_a, concept_b, strength, fire_count, last_fired
             FROM concept_links WHERE concept_a = ?1 AND concept_b = ?2",
            params![a, b],
            row_to_raw,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(raw_to_link).transpose()
}

pub fn links_of(
    conn: &Connection,
    concept: &str,
    min_strength: f64,
    limit: usize,
) -> SynapseResult<Vec<(String, f64)>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT CASE WHEN concept_a = ?1 THEN concept_b ELSE concept_a END AS other, strength
             FROM concept_links
             WHERE (concept_a = ?1 OR concept_b = ?1) AND strength >= ?2
             ORDER BY strength DESC, other ASC
             LIMIT ?3",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![concept, min_strength, limit.min(i64::MAX as usize) as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn all_links(conn: &Connection, min_strength: f64) -> SynapseResult<Vec<ConceptLink>> {
    let mut stmt = conn
        .prepare(
            "SELECT concept_a, concept_b, strength, fire_count, last_fired
             FROM concept_links WHERE strength >= ?1
             ORDER BY concept_a, concept_b",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![min_strength], row_to_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut links = Vec::new();
    for row in rows {
        links.push(raw_to_link(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(links)
}

pub fn link_count(conn: &Connection) -> SynapseResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM concept_links", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}

type RawLink = (String, String, f64, i64, String);

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawLink> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn raw_to_link(raw: RawLink) -> SynapseResult<ConceptLink> {
    let (concept_a, concept_b, strength, fire_count, last_fired) = raw;
    Ok(ConceptLink {
        concept_a,
        concept_b,
        strength,
        fire_count: fire_count as u64,
        last_fired: parse_ts(&last_fired)?,
    })
}
