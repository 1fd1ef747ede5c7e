use crate::errors::SynapseResult;
use crate::models::{
    ConceptLink, ConceptNode, ConsolidationHistoryRecord, FactStatus, LongTermFact, PendingFact,
};

/// Persistence of the concept graph.
///
/// Pair arguments are expected in canonical order (`a < b`, normalized).
pub trait IGraphStorage: Send + Sync {
    // --- Links ---
    /// Hebbian update of one link, inserting it at `rate` if absent.
    /// Also registers both endpoints as nodes. Returns the new strength.
    fn reinforce_link(&self, a: &str, b: &str, rate: f64, cap: f64) -> SynapseResult<f64>;
    /// Multiply every strength by `factor`, then delete links below `min_strength`.
    /// Returns the number of deleted links.
    fn decay_links(&self, factor: f64, min_strength: f64) -> SynapseResult<usize>;
    fn get_link(&self, a: &str, b: &str) -> SynapseResult<Option<ConceptLink>>;
    /// Neighbors on either side, strongest first, ties by name.
    fn links_of(
        &self,
        concept: &str,
        min_strength: f64,
        limit: usize,
    ) -> SynapseResult<Vec<(String, f64)>>;
    fn all_links(&self, min_strength: f64) -> SynapseResult<Vec<ConceptLink>>;
    fn link_count(&self) -> SynapseResult<usize>;

    // --- Nodes ---
    fn upsert_concept(&self, name: &str) -> SynapseResult<()>;
    fn get_concept(&self, name: &str) -> SynapseResult<Option<ConceptNode>>;
    /// Names starting with `prefix`, sorted.
    fn concepts_with_prefix(&self, prefix: &str) -> SynapseResult<Vec<String>>;
    fn concept_count(&self) -> SynapseResult<usize>;

    // --- Co-occurrence ---
    fn increment_cooccurrence(&self, a: &str, b: &str) -> SynapseResult<u64>;
    fn cooccurrence_count(&self, a: &str, b: &str) -> SynapseResult<u64>;
    fn cooccurrence_pair_count(&self) -> SynapseResult<usize>;
}

/// Persistence of pending facts, long-term facts and consolidation history.
pub trait IFactStorage: Send + Sync {
    // --- Pending ---
    fn insert_pending(&self, fact: &PendingFact) -> SynapseResult<()>;
    fn get_pending(&self, id: &str) -> SynapseResult<Option<PendingFact>>;
    /// Never-scored facts oldest first, then scored facts least recently
    /// scored first.
    fn pending_with_status(
        &self,
        statuses: &[FactStatus],
        limit: usize,
    ) -> SynapseResult<Vec<PendingFact>>;
    fn update_pending(&self, fact: &PendingFact) -> SynapseResult<()>;
    /// Update the pending row and append its history record atomically:
    /// either both land or neither does.
    fn settle_pending(
        &self,
        fact: &PendingFact,
        record: &ConsolidationHistoryRecord,
    ) -> SynapseResult<()>;
    /// Delete consolidated and rejected facts of a session.
    fn delete_settled_pending(&self, session_id: &str) -> SynapseResult<usize>;
    fn pending_count(&self) -> SynapseResult<usize>;

    // --- Long-term ---
    fn get_fact(&self, key: &str) -> SynapseResult<Option<LongTermFact>>;
    /// Read-modify-write of one fact under the writer lock.
    fn modify_fact(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<LongTermFact>) -> SynapseResult<LongTermFact>,
    ) -> SynapseResult<LongTermFact>;
    fn all_facts(&self) -> SynapseResult<Vec<LongTermFact>>;
    fn record_access(&self, keys: &[String]) -> SynapseResult<()>;
    fn fact_count(&self) -> SynapseResult<usize>;

    // --- History ---
    fn append_history(&self, record: &ConsolidationHistoryRecord) -> SynapseResult<()>;
    /// Newest first.
    fn history(&self, limit: usize) -> SynapseResult<Vec<ConsolidationHistoryRecord>>;
}
