//! GraphStore: the only writer of concept, link and co-occurrence state.

use std::sync::Arc;

use synapse_core::config::GraphConfig;
use synapse_core::constants::MAX_LINK_STRENGTH;
use synapse_core::errors::{SynapseError, SynapseResult};
use synapse_core::models::{canonical_pair, normalize_concept, ConceptLink};
use synapse_core::traits::IGraphStorage;

use crate::snapshot::ConceptGraph;
use crate::NeighborSource;

pub struct GraphStore {
    storage: Arc<dyn IGraphStorage>,
    config: GraphConfig,
}

impl GraphStore {
    pub fn new(storage: Arc<dyn IGraphStorage>, config: GraphConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Hebbian reinforcement of the link between `a` and `b`.
    ///
    /// Self pairs and empty names are ignored and return `None`.
    pub fn reinforce(&self, a: &str, b: &str, rate: f64) -> SynapseResult<Option<f64>> {
        if rate.is_nan() {
            return Err(SynapseError::InvalidInput("reinforcement rate is NaN".into()));
        }
        let Some((a, b)) = canonical_pair(a, b) else {
            return Ok(None);
        };
        let strength =
            self.storage
                .reinforce_link(&a, &b, rate.clamp(0.0, 1.0), MAX_LINK_STRENGTH)?;
        tracing::trace!(a = %a, b = %b, strength, "link reinforced");
        Ok(Some(strength))
    }

    /// Multiply every link by `factor` and prune links below `min_strength`.
    pub fn decay(&self, factor: f64, min_strength: f64) -> SynapseResult<usize> {
        if !(factor > 0.0 && factor < 1.0) {
            return Err(SynapseError::ConfigError(format!(
                "decay factor must be in (0, 1), got {factor}"
            )));
        }
        if min_strength.is_nan() {
            return Err(SynapseError::ConfigError("decay min_strength is NaN".into()));
        }
        let pruned = self.storage.decay_links(factor, min_strength)?;
        tracing::debug!(factor, min_strength, pruned, "links decayed");
        Ok(pruned)
    }

    /// Decay with the configured factor and floor.
    pub fn decay_default(&self) -> SynapseResult<usize> {
        self.decay(self.config.decay_factor, self.config.min_strength)
    }

    pub fn links_of(
        &self,
        concept: &str,
        min_strength: f64,
        limit: usize,
    ) -> SynapseResult<Vec<(String, f64)>> {
        let concept = normalize_concept(concept);
        if concept.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        self.storage.links_of(&concept, min_strength, limit)
    }

    pub fn link(&self, a: &str, b: &str) -> SynapseResult<Option<ConceptLink>> {
        match canonical_pair(a, b) {
            Some((a, b)) => self.storage.get_link(&a, &b),
            None => Ok(None),
        }
    }

    pub fn link_count(&self) -> SynapseResult<usize> {
        self.storage.link_count()
    }

    pub fn concept_count(&self) -> SynapseResult<usize> {
        self.storage.concept_count()
    }

    /// Count one joint appearance of `a` and `b`.
    pub fn record_cooccurrence(&self, a: &str, b: &str) -> SynapseResult<Option<u64>> {
        match canonical_pair(a, b) {
            Some((a, b)) => self.storage.increment_cooccurrence(&a, &b).map(Some),
            None => Ok(None),
        }
    }

    pub fn cooccurrence_count(&self, a: &str, b: &str) -> SynapseResult<u64> {
        match canonical_pair(a, b) {
            Some((a, b)) => self.storage.cooccurrence_count(&a, &b),
            None => Ok(0),
        }
    }

    pub fn has_cooccurrence_data(&self) -> SynapseResult<bool> {
        Ok(self.storage.cooccurrence_pair_count()? > 0)
    }

    /// `min(cap, Σ ln(count(concept, k) + 1) * scale)` over the context keys.
    pub fn get_cooccurrence_score(
        &self,
        concept: &str,
        context_keys: &[String],
    ) -> SynapseResult<f64> {
        let mut total = 0.0;
        for key in context_keys {
            let count = self.cooccurrence_count(concept, key)?;
            total += ((count as f64) + 1.0).ln() * self.config.cooccurrence_scale;
        }
        Ok(total.min(self.config.cooccurrence_cap))
    }

    /// Reinforce and count every unordered pair of distinct concepts.
    /// Returns the number of pairs linked.
    pub fn link_concepts(&self, concepts: &[String], rate: f64) -> SynapseResult<usize> {
        let mut unique: Vec<String> = Vec::with_capacity(concepts.len());
        for concept in concepts.iter().map(|c| normalize_concept(c)) {
            if !concept.is_empty() && !unique.contains(&concept) {
                unique.push(concept);
            }
        }
        let mut linked = 0;
        for (i, a) in unique.iter().enumerate() {
            for b in &unique[i + 1..] {
                if self.reinforce(a, b, rate)?.is_some() {
                    self.record_cooccurrence(a, b)?;
                    linked += 1;
                }
            }
        }
        Ok(linked)
    }

    pub fn register_concept(&self, name: &str) -> SynapseResult<()> {
        let name = normalize_concept(name);
        if name.is_empty() {
            return Ok(());
        }
        self.storage.upsert_concept(&name)
    }

    /// All nodes named `prefix.*`.
    pub fn children_of(&self, prefix: &str) -> SynapseResult<Vec<String>> {
        let prefix = normalize_concept(prefix);
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        self.storage.concepts_with_prefix(&format!("{prefix}."))
    }

    /// Read-only in-memory copy of every node and of links at or above `min_strength`.
    pub fn snapshot(&self, min_strength: f64) -> SynapseResult<ConceptGraph> {
        let nodes = self.storage.concepts_with_prefix("")?;
        let links = self.storage.all_links(min_strength)?;
        Ok(ConceptGraph::from_parts(nodes, &links))
    }
}

impl NeighborSource for GraphStore {
    fn neighbors(&self, concept: &str, min_strength: f64) -> SynapseResult<Vec<(String, f64)>> {
        self.links_of(concept, min_strength, usize::MAX)
    }

    fn children_of(&self, prefix: &str) -> SynapseResult<Vec<String>> {
        GraphStore::children_of(self, prefix)
    }
}
