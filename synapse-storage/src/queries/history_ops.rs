//! consolidation_history (append-only).

use rusqlite::{params, Connection};

use synapse_core::errors::SynapseResult;
use synapse_core::models::{ConsolidationHistoryRecord, ScoreBreakdown};

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

pub fn append(conn: &Connection, record: &ConsolidationHistoryRecord) -> SynapseResult<()> {
    conn.execute(
        "INSERT INTO consolidation_history
             (fact_text, from_level, to_level, permanence, relevance, identity, total,
              reason, session_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.fact_text,
            record.from_level,
            record.to_level,
            record.score.permanence,
            record.score.relevance,
            record.score.identity,
            record.score.total,
            record.reason,
            record.session_id,
            fmt_ts(&record.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Newest first.
pub fn recent(conn: &Connection, limit: usize) -> SynapseResult<Vec<ConsolidationHistoryRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT fact_text, from_level, to_level, permanence, relevance, identity, total,
                    reason, session_id, created_at
             FROM consolidation_history ORDER BY id DESC LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u8>(1)?,
                row.get::<_, u8>(2)?,
                ScoreBreakdown {
                    permanence: row.get(3)?,
                    relevance: row.get(4)?,
                    identity: row.get(5)?,
                    total: row.get(6)?,
                },
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, String>(9)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let (fact_text, from_level, to_level, score, reason, session_id, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        records.push(ConsolidationHistoryRecord {
            fact_text,
            from_level,
            to_level,
            score,
            reason,
            session_id,
            created_at: parse_ts(&created_at)?,
        });
    }
    Ok(records)
}
