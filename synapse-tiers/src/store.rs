use std::sync::Arc;

use chrono::Utc;
use synapse_core::errors::{SynapseError, SynapseResult};
use synapse_core::models::{ConsolidationHistoryRecord, FactStatus, LongTermFact, PendingFact};
use synapse_core::traits::IFactStorage;
use tracing::debug;

use crate::promotion::Promotion;

/// Statuses eligible for a consolidation batch.
const CANDIDATE_STATUSES: [FactStatus; 2] = [FactStatus::Pending, FactStatus::Approved];

/// The only path through which fact rows change.
pub struct TieredFactStore {
    storage: Arc<dyn IFactStorage>,
}

impl TieredFactStore {
    pub fn new(storage: Arc<dyn IFactStorage>) -> Self {
        Self { storage }
    }

    // --- Pending ---

    /// Record a new pending observation.
    pub fn add_pending(
        &self,
        text: &str,
        session_id: &str,
        source: &str,
    ) -> SynapseResult<PendingFact> {
        let fact = PendingFact::new(text.trim(), session_id, source);
        self.insert_pending(&fact)?;
        Ok(fact)
    }

    pub fn insert_pending(&self, fact: &PendingFact) -> SynapseResult<()> {
        if fact.text.trim().is_empty() {
            return Err(SynapseError::InvalidInput(
                "pending fact text must not be empty".into(),
            ));
        }
        self.storage.insert_pending(fact)
    }

    pub fn get_pending(&self, id: &str) -> SynapseResult<Option<PendingFact>> {
        self.storage.get_pending(id)
    }

    /// Up to `limit` pending or approved facts. Facts never scored come
    /// first, so facts held back by earlier runs cannot starve new ones.
    pub fn consolidation_batch(&self, limit: usize) -> SynapseResult<Vec<PendingFact>> {
        self.storage.pending_with_status(&CANDIDATE_STATUSES, limit)
    }

    pub fn pending_with_status(
        &self,
        statuses: &[FactStatus],
        limit: usize,
    ) -> SynapseResult<Vec<PendingFact>> {
        self.storage.pending_with_status(statuses, limit)
    }

    /// Persist scoring results on a pending fact.
    pub fn stamp(
        &self,
        fact: &mut PendingFact,
        confidence_score: f64,
        hier_key: &str,
    ) -> SynapseResult<()> {
        fact.confidence_score = Some(confidence_score);
        fact.hier_key = Some(hier_key.to_string());
        fact.updated_at = Utc::now();
        self.storage.update_pending(fact)
    }

    pub fn set_status(&self, fact: &mut PendingFact, status: FactStatus) -> SynapseResult<()> {
        fact.status = status;
        fact.updated_at = Utc::now();
        self.storage.update_pending(fact)
    }

    /// Mark a fact consolidated and append its history record in one
    /// transaction. On error the fact keeps its previous status.
    pub fn settle(
        &self,
        fact: &mut PendingFact,
        record: &ConsolidationHistoryRecord,
    ) -> SynapseResult<()> {
        let previous = fact.status;
        fact.status = FactStatus::Consolidated;
        fact.updated_at = Utc::now();
        if let Err(e) = self.storage.settle_pending(fact, record) {
            fact.status = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Change the status of a stored pending fact by id.
    pub fn set_status_by_id(&self, id: &str, status: FactStatus) -> SynapseResult<PendingFact> {
        let mut fact = self
            .storage
            .get_pending(id)?
            .ok_or_else(|| SynapseError::PendingFactNotFound { id: id.to_string() })?;
        self.set_status(&mut fact, status)?;
        Ok(fact)
    }

    /// Facts still awaiting consolidation or review.
    pub fn pending_count(&self) -> SynapseResult<usize> {
        self.storage.pending_count()
    }

    /// Remove the consolidated and rejected facts of a session.
    pub fn clear_session(&self, session_id: &str) -> SynapseResult<usize> {
        let removed = self.storage.delete_settled_pending(session_id)?;
        debug!(session_id, removed, "cleared settled pending facts");
        Ok(removed)
    }

    // --- Long-term ---

    /// Merge a promoted text into its long-term fact.
    pub fn promote(&self, promotion: &Promotion) -> SynapseResult<LongTermFact> {
        if promotion.key.trim().is_empty() {
            return Err(SynapseError::InvalidInput(
                "long-term fact key must not be empty".into(),
            ));
        }
        let fact = self
            .storage
            .modify_fact(&promotion.key, &mut |existing| Ok(promotion.apply(existing)))?;
        debug!(
            key = %fact.key,
            level = promotion.level.as_u8(),
            weight = fact.weight,
            "fact promoted"
        );
        Ok(fact)
    }

    pub fn get(&self, key: &str) -> SynapseResult<Option<LongTermFact>> {
        self.storage.get_fact(key)
    }

    pub fn get_required(&self, key: &str) -> SynapseResult<LongTermFact> {
        self.get(key)?
            .ok_or_else(|| SynapseError::FactNotFound { key: key.to_string() })
    }

    pub fn all_facts(&self) -> SynapseResult<Vec<LongTermFact>> {
        self.storage.all_facts()
    }

    /// Bump `access_count` and `last_accessed` of returned facts.
    pub fn touch(&self, keys: &[String]) -> SynapseResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        self.storage.record_access(keys)
    }

    pub fn fact_count(&self) -> SynapseResult<usize> {
        self.storage.fact_count()
    }

    // --- History ---

    pub fn record_history(&self, record: &ConsolidationHistoryRecord) -> SynapseResult<()> {
        self.storage.append_history(record)
    }

    /// Newest first.
    pub fn history(&self, limit: usize) -> SynapseResult<Vec<ConsolidationHistoryRecord>> {
        self.storage.history(limit)
    }
}
