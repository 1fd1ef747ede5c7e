//! The engine: one owner for every store, scorer and pipeline.
//!
//! All operations are synchronous and safe to call from several threads;
//! the scheduler drives them from blocking worker threads.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use synapse_consolidation::{ConsolidationEngine, ExtractionPipeline, RunStats};
use synapse_core::config::SynapseConfig;
use synapse_core::errors::{ExtractionError, SynapseError, SynapseResult};
use synapse_core::models::{
    ExtractedFact, HealthReport, LongTermFact, OperationalEvent, PendingFact,
};
use synapse_core::traits::IEventSink;
use synapse_embeddings::EmbeddingEngine;
use synapse_graph::concepts::extract_concepts;
use synapse_graph::GraphStore;
use synapse_observability::tracing_setup::events;
use synapse_observability::{
    consolidation_span, decay_span, extraction_span, recall_span, DegradationTracker,
    HealthReporter, HealthSnapshot, TaskHealth, TrackedDegradation,
};
use synapse_retrieval::{RelevanceScorer, ScoredFact};
use synapse_scheduler::{TaskSnapshot, TaskStatus};
use synapse_storage::StorageEngine;
use synapse_tiers::TieredFactStore;
use tracing::{debug, warn};

use crate::builder::EngineBuilder;
use crate::inbox::Inbox;

/// Source label of facts produced by the extraction pipeline.
pub const EXTRACTION_SOURCE: &str = "extraction";

const EMBEDDINGS_COMPONENT: &str = "embeddings";

/// Outcome of one pass over the extraction inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub conversations: usize,
    pub facts: usize,
    /// Facts that could not be stored.
    pub errors: usize,
}

/// Outcome of storing one conversation's extracted facts.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub stored: Vec<PendingFact>,
    /// Facts whose insert failed; the rest of the batch was still stored.
    pub failed: usize,
}

pub struct Engine {
    pub(crate) config: SynapseConfig,
    pub(crate) storage: Arc<StorageEngine>,
    pub(crate) graph: Arc<GraphStore>,
    pub(crate) embeddings: Arc<EmbeddingEngine>,
    pub(crate) relevance: RelevanceScorer,
    pub(crate) facts: Arc<TieredFactStore>,
    pub(crate) consolidation: ConsolidationEngine,
    pub(crate) extraction: Option<ExtractionPipeline>,
    pub(crate) inbox: Inbox,
    pub(crate) events: Arc<dyn IEventSink>,
    pub(crate) degradation: Mutex<DegradationTracker>,
    pub(crate) last_health: Mutex<Option<HealthReport>>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &SynapseConfig {
        &self.config
    }

    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn facts(&self) -> &TieredFactStore {
        &self.facts
    }

    pub fn embeddings(&self) -> &EmbeddingEngine {
        &self.embeddings
    }

    pub fn consolidation(&self) -> &ConsolidationEngine {
        &self.consolidation
    }

    // --- Ingestion ---

    /// Record an observation as a pending fact and reinforce the links
    /// between its concepts.
    pub fn ingest(&self, text: &str, session_id: &str, source: &str) -> SynapseResult<PendingFact> {
        let fact = self.facts.add_pending(text, session_id, source)?;
        self.learn_associations(&fact.text);
        Ok(fact)
    }

    /// Store validated extractor output as pending facts carrying their keys.
    /// A fact that fails to store is counted and skipped.
    pub fn ingest_extracted(&self, extracted: &[ExtractedFact], session_id: &str) -> IngestReport {
        let mut report = IngestReport {
            stored: Vec::with_capacity(extracted.len()),
            failed: 0,
        };
        for item in extracted {
            let fact = PendingFact::new(item.text.trim(), session_id, EXTRACTION_SOURCE)
                .with_key(item.key.as_str());
            if let Err(e) = self.facts.insert_pending(&fact) {
                warn!(key = %item.key, error = %e, "failed to store extracted fact");
                report.failed += 1;
                continue;
            }
            self.learn_associations(&fact.text);
            report.stored.push(fact);
        }
        report
    }

    fn learn_associations(&self, text: &str) {
        let graph_config = self.graph.config();
        let concepts = extract_concepts(text, graph_config.max_concepts_per_fact);
        match self
            .graph
            .link_concepts(&concepts, graph_config.learning_rate)
        {
            Ok(linked) => debug!(concepts = concepts.len(), linked, "associations learned"),
            Err(e) => warn!(error = %e, "failed to reinforce concept links"),
        }
    }

    // --- Extraction inbox ---

    /// Queue a conversation for the next extraction pass. Returns the
    /// queue length.
    pub fn submit_conversation(&self, session_id: &str, text: &str) -> SynapseResult<usize> {
        if self.extraction.is_none() {
            return Err(ExtractionError::ExtractorUnavailable {
                reason: "no extractor configured".into(),
            }
            .into());
        }
        if text.trim().is_empty() {
            return Err(SynapseError::InvalidInput(
                "conversation text must not be empty".into(),
            ));
        }
        self.inbox.push(session_id, text)
    }

    pub fn inbox_len(&self) -> usize {
        self.inbox.len()
    }

    /// Extract facts from every queued conversation and store them as
    /// pending. A conversation whose extraction fails yields no facts.
    pub fn process_inbox(&self) -> SynapseResult<ExtractionStats> {
        let Some(pipeline) = &self.extraction else {
            return Ok(ExtractionStats::default());
        };
        let mut stats = ExtractionStats::default();
        for conversation in self.inbox.drain() {
            let _span = extraction_span!(conversation.session_id).entered();
            stats.conversations += 1;
            let extracted = pipeline.extract(&conversation.text);
            let report = self.ingest_extracted(&extracted, &conversation.session_id);
            stats.facts += report.stored.len();
            stats.errors += report.failed;
        }
        if stats.conversations > 0 {
            events::extraction_completed(stats.conversations, stats.facts);
            self.emit("extraction_completed", &stats);
        }
        Ok(stats)
    }

    // --- Recall ---

    /// Rank long-term facts for `query`, most relevant first, and count an
    /// access on each returned fact.
    pub fn recall(
        &self,
        query: &str,
        context_keys: &[String],
        limit: usize,
    ) -> SynapseResult<Vec<ScoredFact<LongTermFact>>> {
        let _span = recall_span!(query, limit).entered();
        if limit == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let candidates = self.facts.all_facts()?;
        let mut ranked = self.relevance.score(query, &candidates, context_keys);
        ranked.truncate(limit);

        let keys: Vec<String> = ranked.iter().map(|s| s.fact.key.clone()).collect();
        if let Err(e) = self.facts.touch(&keys) {
            warn!(error = %e, "failed to record fact access");
        }
        self.absorb_degradations();
        debug!(candidates = candidates.len(), returned = ranked.len(), "recall complete");
        Ok(ranked)
    }

    // --- Maintenance ---

    /// One consolidation run over the pending batch.
    pub fn consolidate(&self) -> SynapseResult<RunStats> {
        let _span = consolidation_span!(self.config.consolidation.max_facts_per_run).entered();
        let stats = self.consolidation.run()?;
        events::consolidation_completed(
            stats.processed,
            stats.promoted_l2 + stats.promoted_l3,
            stats.discarded,
            stats.skipped,
            stats.errors,
        );
        Ok(stats)
    }

    /// Remove consolidated and rejected pending facts of a session.
    pub fn clear_session(&self, session_id: &str) -> SynapseResult<usize> {
        self.consolidation.clear_session(session_id)
    }

    /// Decay every concept link and prune the weak ones. Returns the number
    /// pruned.
    pub fn decay(&self) -> SynapseResult<usize> {
        let _span = decay_span!(self.config.graph.decay_factor).entered();
        let pruned = self.graph.decay_default()?;
        let remaining = self.graph.link_count()?;
        events::decay_completed(pruned, remaining);
        self.emit(
            "decay_completed",
            &serde_json::json!({ "pruned": pruned, "remaining": remaining }),
        );
        Ok(pruned)
    }

    // --- Health ---

    /// Build a health report from the stores and the given task states.
    pub fn health(&self, tasks: &[TaskSnapshot]) -> HealthReport {
        self.absorb_degradations();
        let snapshot = self.health_snapshot(tasks);
        let report = HealthReporter::build(&snapshot);
        *self
            .last_health
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(report.clone());
        report
    }

    /// The report built by the most recent `health` call.
    pub fn latest_health(&self) -> Option<HealthReport> {
        self.last_health
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.tracker().events().to_vec()
    }

    fn health_snapshot(&self, tasks: &[TaskSnapshot]) -> HealthSnapshot {
        let (storage_ok, storage_error, (concepts, links, pending, long_term)) =
            match self.store_counts() {
                Ok(counts) => (true, None, counts),
                Err(e) => (false, Some(e.to_string()), (0, 0, 0, 0)),
            };

        HealthSnapshot {
            storage_ok,
            storage_error,
            concept_count: concepts,
            link_count: links,
            pending_facts: pending,
            long_term_facts: long_term,
            embedding_provider: self.embeddings.provider_name().map(str::to_string),
            embedding_available: self.embeddings.is_available(),
            embedding_cache_hit_rate: self.embeddings.cache_hit_rate(),
            active_degradations: self.tracker().active_degradations().len(),
            tasks: tasks.iter().map(task_health).collect(),
        }
    }

    /// Concepts, links, pending facts, long-term facts.
    fn store_counts(&self) -> SynapseResult<(usize, usize, usize, usize)> {
        Ok((
            self.graph.concept_count()?,
            self.graph.link_count()?,
            self.facts.pending_count()?,
            self.facts.fact_count()?,
        ))
    }

    /// Move embedding fallbacks into the tracker. A quiet provider that
    /// reports itself available closes the open embedding degradations.
    fn absorb_degradations(&self) {
        let fresh = self.embeddings.drain_degradation_events();
        let mut tracker = self.tracker();
        if fresh.is_empty() {
            if self.embeddings.is_available() && tracker.is_degraded(EMBEDDINGS_COMPONENT) {
                tracker.mark_recovered(EMBEDDINGS_COMPONENT);
            }
            return;
        }
        for event in fresh {
            tracker.record(event);
        }
    }

    fn tracker(&self) -> std::sync::MutexGuard<'_, DegradationTracker> {
        self.degradation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit<T: Serialize>(&self, kind: &str, payload: &T) {
        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                warn!(kind, error = %e, "failed to serialize operational event");
                return;
            }
        };
        if let Err(e) = self.events.emit(&OperationalEvent::new(kind, payload)) {
            warn!(kind, error = %e, "failed to emit operational event");
        }
    }
}

fn task_health(snapshot: &TaskSnapshot) -> TaskHealth {
    TaskHealth {
        name: snapshot.kind.to_string(),
        errored: snapshot.status == TaskStatus::Error,
        consecutive_errors: snapshot.consecutive_errors,
        last_error: snapshot.last_error.clone(),
    }
}
