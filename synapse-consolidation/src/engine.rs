//! ConsolidationEngine: single-execution guard, per-fact state machine
//! `pending → scored → {promoted_l2 | promoted_l3 | discarded | skipped}`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use synapse_core::config::{ConsolidationConfig, GraphConfig};
use synapse_core::constants::{DISCARDED_LEVEL, PENDING_LEVEL};
use synapse_core::errors::{ConsolidationError, SynapseError, SynapseResult};
use synapse_core::models::{
    ConsolidationHistoryRecord, FactType, OperationalEvent, PendingFact, ScoreBreakdown,
};
use synapse_core::traits::{IEventSink, IFactScorer};
use synapse_graph::concepts::extract_concepts;
use synapse_graph::GraphStore;
use synapse_tiers::{Promotion, TieredFactStore};
use tracing::{debug, info, warn};

use crate::keys::{classify_destination, generate_key};
use crate::scoring::{decide, score_fact, Destination};

/// Counters for one consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub processed: usize,
    pub promoted_l2: usize,
    pub promoted_l3: usize,
    pub discarded: usize,
    pub skipped: usize,
    /// Facts left pending because a storage step failed.
    pub errors: usize,
    pub duration_ms: u64,
}

/// Scoring result for one pending fact, before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct FactPlan {
    pub score: ScoreBreakdown,
    pub fact_type: FactType,
    pub key: String,
    pub destination: Destination,
}

/// Clears the running flag on every exit path, unwinding included.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ConsolidationEngine {
    /// Only one consolidation can run at a time.
    is_running: Arc<AtomicBool>,
    tiers: Arc<TieredFactStore>,
    graph: Arc<GraphStore>,
    scorer: Arc<dyn IFactScorer>,
    events: Option<Arc<dyn IEventSink>>,
    config: ConsolidationConfig,
    graph_config: GraphConfig,
}

impl ConsolidationEngine {
    pub fn new(
        tiers: Arc<TieredFactStore>,
        graph: Arc<GraphStore>,
        scorer: Arc<dyn IFactScorer>,
        config: ConsolidationConfig,
        graph_config: GraphConfig,
    ) -> Self {
        Self {
            is_running: Arc::new(AtomicBool::new(false)),
            tiers,
            graph,
            scorer,
            events: None,
            config,
            graph_config,
        }
    }

    /// Emit a summary event after every run.
    pub fn with_event_sink(mut self, sink: Arc<dyn IEventSink>) -> Self {
        self.events = Some(sink);
        self
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    /// Score, classify and key one fact without side effects.
    pub fn plan(&self, fact: &PendingFact) -> FactPlan {
        let score = score_fact(self.scorer.as_ref(), &fact.text, &fact.session_id);
        let fact_type = classify_destination(&fact.text);
        let key = generate_key(
            &fact.text,
            fact_type,
            fact.hier_key.as_deref(),
            self.config.max_key_tokens,
        );
        FactPlan {
            destination: decide(score.total, &self.config),
            score,
            fact_type,
            key,
        }
    }

    /// Process up to `max_facts_per_run` pending or approved facts.
    ///
    /// Fails only when another run is in progress or the batch cannot be
    /// read; per-fact failures are counted in `RunStats::errors`.
    pub fn run(&self) -> SynapseResult<RunStats> {
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ConsolidationError::AlreadyRunning.into());
        }
        let _guard = RunGuard(&self.is_running);

        let started = Instant::now();
        let batch = self.tiers.consolidation_batch(self.config.max_facts_per_run)?;
        let mut stats = RunStats {
            processed: batch.len(),
            ..RunStats::default()
        };

        for mut fact in batch {
            match self.process(&mut fact) {
                Ok(Destination::PromoteL2) => stats.promoted_l2 += 1,
                Ok(Destination::PromoteL3) => stats.promoted_l3 += 1,
                Ok(Destination::Discard) => stats.discarded += 1,
                Ok(Destination::Skip) => stats.skipped += 1,
                Err(e) => {
                    warn!(fact_id = %fact.id, error = %e, "consolidation of fact failed");
                    stats.errors += 1;
                }
            }
        }
        stats.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            processed = stats.processed,
            promoted_l2 = stats.promoted_l2,
            promoted_l3 = stats.promoted_l3,
            discarded = stats.discarded,
            skipped = stats.skipped,
            errors = stats.errors,
            duration_ms = stats.duration_ms,
            "consolidation run complete"
        );
        self.emit_summary(&stats);
        Ok(stats)
    }

    /// Remove consolidated and rejected facts of a session.
    pub fn clear_session(&self, session_id: &str) -> SynapseResult<usize> {
        self.tiers.clear_session(session_id)
    }

    fn process(&self, fact: &mut PendingFact) -> SynapseResult<Destination> {
        let plan = self.plan(fact);
        self.tiers.stamp(fact, plan.score.total, &plan.key)?;
        debug!(
            fact_id = %fact.id,
            key = %plan.key,
            total = plan.score.total,
            destination = plan.destination.as_str(),
            "fact scored"
        );

        let to_level = match plan.destination.level() {
            Some(level) => {
                let promotion = Promotion::new(
                    &plan.key,
                    fact.text.as_str(),
                    level,
                    plan.score.weight(),
                    plan.fact_type,
                );
                self.tiers.promote(&promotion).map_err(|e| {
                    SynapseError::from(ConsolidationError::PromotionFailed {
                        key: plan.key.clone(),
                        reason: e.to_string(),
                    })
                })?;
                level.as_u8()
            }
            None if plan.destination == Destination::Skip => return Ok(Destination::Skip),
            None => DISCARDED_LEVEL,
        };

        let record = ConsolidationHistoryRecord {
            fact_text: fact.text.clone(),
            from_level: PENDING_LEVEL,
            to_level,
            score: plan.score,
            reason: format!("{} (total {:.2})", plan.destination.as_str(), plan.score.total),
            session_id: fact.session_id.clone(),
            created_at: Utc::now(),
        };
        self.tiers.settle(fact, &record)?;

        if plan.destination != Destination::Discard {
            self.feed_graph(&plan.key, &fact.text);
        }
        Ok(plan.destination)
    }

    /// Register the key as a node and tie it to the fact's concepts.
    /// Failures only degrade future relevance, so they are logged.
    fn feed_graph(&self, key: &str, text: &str) {
        if let Err(e) = self.link_key(key, text) {
            warn!(key, error = %e, "graph update after promotion failed");
        }
    }

    fn link_key(&self, key: &str, text: &str) -> SynapseResult<()> {
        self.graph.register_concept(key)?;
        let rate = self.graph_config.learning_rate;
        for concept in extract_concepts(text, self.graph_config.max_concepts_per_fact) {
            self.graph.reinforce(key, &concept, rate)?;
            self.graph.record_cooccurrence(key, &concept)?;
        }
        Ok(())
    }

    fn emit_summary(&self, stats: &RunStats) {
        let Some(sink) = &self.events else {
            return;
        };
        let payload = match serde_json::to_value(stats) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "run summary not serializable");
                return;
            }
        };
        if let Err(e) = sink.emit(&OperationalEvent::new("consolidation_completed", payload)) {
            warn!(error = %e, "run summary not recorded");
        }
    }
}
