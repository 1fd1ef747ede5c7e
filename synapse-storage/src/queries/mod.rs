//! SQL for each table family. Every function takes a borrowed connection so
//! the engine decides between writer and reader.

pub mod concept_ops;
pub mod cooccurrence_ops;
pub mod event_ops;
pub mod fact_ops;
pub mod history_ops;
pub mod link_ops;
pub mod pending_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

/// Fixed-width RFC 3339 so text ordering matches time ordering.
pub(crate) fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(raw: &str) -> SynapseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw:?}: {e}")))
}

pub(crate) fn parse_ts_opt(raw: Option<String>) -> SynapseResult<Option<DateTime<Utc>>> {
    raw.as_deref().map(parse_ts).transpose()
}
