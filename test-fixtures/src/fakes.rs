//! Deterministic fakes for embedders, scorers, extractors, event sinks
//! and a fact store that fails on demand.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use synapse_core::errors::{
    EmbeddingError, ExtractionError, StorageError, SynapseError, SynapseResult,
};
use synapse_core::models::{
    ConsolidationHistoryRecord, FactScore, FactStatus, LongTermFact, OperationalEvent, PendingFact,
};
use synapse_core::text::tokenize;
use synapse_core::traits::{
    IEmbeddingProvider, IEventSink, IFactExtractor, IFactScorer, IFactStorage,
};

/// Bag-of-words embedder: every token is hashed with blake3 into one of
/// `dims` buckets. Texts sharing words have positive cosine similarity.
pub struct HashEmbedder {
    dims: usize,
}

impl HashEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(64)
    }
}

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, text: &str) -> SynapseResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dims];
        for token in tokenize(text) {
            let hash = blake3::hash(token.as_bytes());
            let bytes = hash.as_bytes();
            let bucket = u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]) as usize
                % self.dims;
            vector[bucket] += 1.0;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        Ok(vector)
    }

    fn name(&self) -> &str {
        "hash"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Reports itself unavailable and refuses to embed.
pub struct UnavailableEmbedder;

impl IEmbeddingProvider for UnavailableEmbedder {
    fn embed(&self, _text: &str) -> SynapseResult<Vec<f32>> {
        Err(EmbeddingError::ProviderUnavailable {
            provider: "unavailable".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Claims availability but every call fails.
pub struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> SynapseResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "model crashed".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Sleeps before delegating to a [`HashEmbedder`]. Texts marked with
/// [`SlowEmbedder::fast_for`] are answered immediately.
pub struct SlowEmbedder {
    delay: Duration,
    inner: HashEmbedder,
    fast: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl SlowEmbedder {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: HashEmbedder::default(),
            fast: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fast_for(mut self, text: impl Into<String>) -> Self {
        self.fast.push(text.into());
        self
    }

    /// Handle to the number of calls that reached this provider.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl IEmbeddingProvider for SlowEmbedder {
    fn embed(&self, text: &str) -> SynapseResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.fast.iter().any(|t| t == text) {
            std::thread::sleep(self.delay);
        }
        self.inner.embed(text)
    }

    fn name(&self) -> &str {
        "slow"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Counts calls reaching the provider.
pub struct CountingEmbedder {
    inner: HashEmbedder,
    calls: Arc<AtomicUsize>,
}

impl CountingEmbedder {
    /// The embedder plus a handle to its call counter.
    pub fn with_counter() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: HashEmbedder::default(),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl IEmbeddingProvider for CountingEmbedder {
    fn embed(&self, text: &str) -> SynapseResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text)
    }

    fn name(&self) -> &str {
        "counting"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Returns a scripted score per fact text, or a default.
pub struct ScriptedScorer {
    scores: HashMap<String, FactScore>,
    default: FactScore,
}

impl ScriptedScorer {
    pub fn new(default: FactScore) -> Self {
        Self {
            scores: HashMap::new(),
            default,
        }
    }

    pub fn with(mut self, text: &str, permanence: f64, relevance: f64, identity: f64) -> Self {
        self.scores.insert(
            text.to_string(),
            FactScore::new(permanence, relevance, identity),
        );
        self
    }
}

impl IFactScorer for ScriptedScorer {
    fn score(&self, fact_text: &str, _context: &str) -> SynapseResult<FactScore> {
        Ok(self
            .scores
            .get(fact_text)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Every call fails.
pub struct FailingScorer;

impl IFactScorer for FailingScorer {
    fn score(&self, _fact_text: &str, _context: &str) -> SynapseResult<FactScore> {
        Err(SynapseError::DegradedMode {
            component: "scorer".into(),
            fallback: "none".into(),
        })
    }
}

/// Replays scripted responses in order; once exhausted, returns `[]`.
/// Records the correction passed to every call.
#[derive(Default)]
pub struct ScriptedExtractor {
    responses: Mutex<VecDeque<SynapseResult<String>>>,
    corrections: Mutex<Vec<Option<String>>>,
}

impl ScriptedExtractor {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            corrections: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failing call.
    pub fn push_failure(&self) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Err(ExtractionError::ExtractorUnavailable {
                reason: "scripted failure".into(),
            }
            .into()));
        }
    }

    pub fn calls(&self) -> usize {
        self.corrections.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn corrections(&self) -> Vec<Option<String>> {
        self.corrections
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl IFactExtractor for ScriptedExtractor {
    fn extract(&self, _conversation_text: &str, correction: Option<&str>) -> SynapseResult<String> {
        if let Ok(mut seen) = self.corrections.lock() {
            seen.push(correction.map(str::to_string));
        }
        match self.responses.lock() {
            Ok(mut queue) => queue.pop_front().unwrap_or_else(|| Ok("[]".to_string())),
            Err(_) => Ok("[]".to_string()),
        }
    }
}

/// Keeps every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<OperationalEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<OperationalEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl IEventSink for RecordingSink {
    fn emit(&self, event: &OperationalEvent) -> SynapseResult<()> {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
        Ok(())
    }
}

/// Rejects every event.
pub struct FailingSink;

impl IEventSink for FailingSink {
    fn emit(&self, _event: &OperationalEvent) -> SynapseResult<()> {
        Err(SynapseError::InvalidInput("sink offline".into()))
    }
}

/// Wraps a real fact store and fails selected writes.
pub struct FlakyFactStorage {
    inner: Arc<dyn IFactStorage>,
    rejected_inserts: Vec<String>,
    failing_settles: AtomicUsize,
}

impl FlakyFactStorage {
    pub fn new(inner: Arc<dyn IFactStorage>) -> Self {
        Self {
            inner,
            rejected_inserts: Vec::new(),
            failing_settles: AtomicUsize::new(0),
        }
    }

    /// Inserts of facts whose text contains `needle` fail.
    pub fn reject_inserts_containing(mut self, needle: impl Into<String>) -> Self {
        self.rejected_inserts.push(needle.into());
        self
    }

    /// The next `n` settles fail before touching the inner store.
    pub fn fail_next_settles(self, n: usize) -> Self {
        self.failing_settles.store(n, Ordering::SeqCst);
        self
    }

    fn injected(what: &str) -> SynapseError {
        StorageError::SqliteError {
            message: format!("injected {what} failure"),
        }
        .into()
    }
}

impl IFactStorage for FlakyFactStorage {
    fn insert_pending(&self, fact: &PendingFact) -> SynapseResult<()> {
        if self.rejected_inserts.iter().any(|n| fact.text.contains(n.as_str())) {
            return Err(Self::injected("insert"));
        }
        self.inner.insert_pending(fact)
    }

    fn get_pending(&self, id: &str) -> SynapseResult<Option<PendingFact>> {
        self.inner.get_pending(id)
    }

    fn pending_with_status(
        &self,
        statuses: &[FactStatus],
        limit: usize,
    ) -> SynapseResult<Vec<PendingFact>> {
        self.inner.pending_with_status(statuses, limit)
    }

    fn update_pending(&self, fact: &PendingFact) -> SynapseResult<()> {
        self.inner.update_pending(fact)
    }

    fn settle_pending(
        &self,
        fact: &PendingFact,
        record: &ConsolidationHistoryRecord,
    ) -> SynapseResult<()> {
        let failing = self
            .failing_settles
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Self::injected("settle"));
        }
        self.inner.settle_pending(fact, record)
    }

    fn delete_settled_pending(&self, session_id: &str) -> SynapseResult<usize> {
        self.inner.delete_settled_pending(session_id)
    }

    fn pending_count(&self) -> SynapseResult<usize> {
        self.inner.pending_count()
    }

    fn get_fact(&self, key: &str) -> SynapseResult<Option<LongTermFact>> {
        self.inner.get_fact(key)
    }

    fn modify_fact(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<LongTermFact>) -> SynapseResult<LongTermFact>,
    ) -> SynapseResult<LongTermFact> {
        self.inner.modify_fact(key, f)
    }

    fn all_facts(&self) -> SynapseResult<Vec<LongTermFact>> {
        self.inner.all_facts()
    }

    fn record_access(&self, keys: &[String]) -> SynapseResult<()> {
        self.inner.record_access(keys)
    }

    fn fact_count(&self) -> SynapseResult<usize> {
        self.inner.fact_count()
    }

    fn append_history(&self, record: &ConsolidationHistoryRecord) -> SynapseResult<()> {
        self.inner.append_history(record)
    }

    fn history(&self, limit: usize) -> SynapseResult<Vec<ConsolidationHistoryRecord>> {
        self.inner.history(limit)
    }
}
