//! Hybrid relevance scorer.
//!
//! Signals and default weights:
//! embedding cosine 0.5 (0.7 without any graph signal), co-occurrence 0.3,
//! spread activation 0.2, keyword overlap 0.1 (1.0 when it is the only
//! signal). Weights are not renormalized when a signal is missing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use synapse_core::config::{GraphConfig, RelevanceConfig};
use synapse_core::models::normalize_concept;
use synapse_core::text::content_words;
use synapse_embeddings::{cosine_similarity, EmbeddingEngine};
use synapse_graph::concepts::extract_concepts;
use synapse_graph::{GraphStore, SpreadActivation};

use crate::candidate::ScoringText;
use crate::signal::{Signal, SignalBreakdown};

/// A candidate with its fused score.
#[derive(Debug, Clone)]
pub struct ScoredFact<T> {
    pub fact: T,
    pub score: f64,
    pub signals: SignalBreakdown,
}

pub struct RelevanceScorer {
    graph: Arc<GraphStore>,
    embeddings: Arc<EmbeddingEngine>,
    weights: RelevanceConfig,
    graph_config: GraphConfig,
}

/// Request-wide state computed once per `score` call.
struct QueryContext {
    words: HashSet<String>,
    embedding: Option<Vec<f32>>,
    cooccurrence_available: bool,
    activation: HashMap<String, f64>,
}

impl RelevanceScorer {
    pub fn new(
        graph: Arc<GraphStore>,
        embeddings: Arc<EmbeddingEngine>,
        weights: RelevanceConfig,
        graph_config: GraphConfig,
    ) -> Self {
        Self {
            graph,
            embeddings,
            weights,
            graph_config,
        }
    }

    /// Score and rank `candidates` for `query`. Ties keep input order.
    pub fn score<T: ScoringText + Clone>(
        &self,
        query: &str,
        candidates: &[T],
        context_keys: &[String],
    ) -> Vec<ScoredFact<T>> {
        let ctx = self.prepare(query, context_keys);
        let graph_available = ctx.cooccurrence_available || !ctx.activation.is_empty();
        let any_other = ctx.embedding.is_some() || graph_available;

        let embedding_weight = if graph_available {
            self.weights.embedding_weight
        } else {
            self.weights.embedding_sole_weight
        };
        let keyword_weight = if any_other {
            self.weights.keyword_weight
        } else {
            self.weights.keyword_sole_weight
        };

        let mut scored: Vec<ScoredFact<T>> = candidates
            .iter()
            .map(|candidate| {
                let signals = self.signals_for(&ctx, candidate, context_keys);
                let score = signals.embedding.weighted(embedding_weight)
                    + signals.cooccurrence.weighted(self.weights.cooccurrence_weight)
                    + signals.spread.weighted(self.weights.spread_weight)
                    + signals.keyword.weighted(keyword_weight);
                ScoredFact {
                    fact: candidate.clone(),
                    score,
                    signals,
                }
            })
            .collect();

        // Stable: equal scores keep insertion order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::debug!(
            candidates = scored.len(),
            embedding = ctx.embedding.is_some(),
            cooccurrence = ctx.cooccurrence_available,
            spread = !ctx.activation.is_empty(),
            "relevance scored"
        );
        scored
    }

    fn prepare(&self, query: &str, context_keys: &[String]) -> QueryContext {
        let words: HashSet<String> = content_words(query).into_iter().collect();
        let embedding = self.embeddings.try_embed(query);

        let cooccurrence_available = !context_keys.is_empty()
            && match self.graph.has_cooccurrence_data() {
                Ok(has) => has,
                Err(e) => {
                    tracing::warn!(error = %e, "co-occurrence unavailable");
                    false
                }
            };

        let seeds = extract_concepts(query, self.graph_config.max_concepts_per_fact);
        let spread = SpreadActivation::from_config(self.graph.as_ref(), &self.graph_config);
        let activation = match spread.activate(
            &seeds,
            self.graph_config.activation_threshold,
            self.graph_config.max_hops,
            self.graph_config.activation_limit,
        ) {
            Ok(activated) => activated
                .into_iter()
                .map(|a| (a.concept, a.activation))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "spread activation unavailable");
                HashMap::new()
            }
        };

        QueryContext {
            words,
            embedding,
            cooccurrence_available,
            activation,
        }
    }

    fn signals_for<T: ScoringText>(
        &self,
        ctx: &QueryContext,
        candidate: &T,
        context_keys: &[String],
    ) -> SignalBreakdown {
        let text = candidate.scoring_text();
        let mut concepts = extract_concepts(&text, self.graph_config.max_concepts_per_fact);
        if let Some(key) = candidate.concept_key() {
            let key = normalize_concept(key);
            if !key.is_empty() && !concepts.contains(&key) {
                concepts.push(key);
            }
        }

        let embedding = match &ctx.embedding {
            Some(query_vec) => Signal::Available(
                self.embeddings
                    .try_embed(&text)
                    .map_or(0.0, |v| cosine_similarity(query_vec, &v).max(0.0)),
            ),
            None => Signal::Unavailable,
        };

        let cooccurrence = if ctx.cooccurrence_available {
            Signal::Available(self.cooccurrence_boost(&concepts, context_keys))
        } else {
            Signal::Unavailable
        };

        let spread = if ctx.activation.is_empty() {
            Signal::Unavailable
        } else {
            Signal::Available(
                concepts
                    .iter()
                    .filter_map(|c| ctx.activation.get(c).copied())
                    .fold(0.0, f64::max),
            )
        };

        SignalBreakdown {
            embedding,
            cooccurrence,
            spread,
            keyword: Signal::Available(keyword_overlap(&ctx.words, &text)),
        }
    }

    /// Mean co-occurrence score over the candidate's top concepts.
    fn cooccurrence_boost(&self, concepts: &[String], context_keys: &[String]) -> f64 {
        let top: Vec<&String> = concepts.iter().take(self.weights.top_concepts).collect();
        if top.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        for concept in &top {
            match self.graph.get_cooccurrence_score(concept, context_keys) {
                Ok(score) => total += score,
                Err(e) => {
                    tracing::warn!(concept = %concept, error = %e, "co-occurrence lookup failed")
                }
            }
        }
        total / top.len() as f64
    }
}

/// `|query ∩ fact| / |query|` over content words.
pub fn keyword_overlap(query_words: &HashSet<String>, fact_text: &str) -> f64 {
    if query_words.is_empty() {
        return 0.0;
    }
    let fact_words: HashSet<String> = content_words(fact_text).into_iter().collect();
    let shared = query_words.intersection(&fact_words).count();
    shared as f64 / query_words.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> HashSet<String> {
        content_words(text).into_iter().collect()
    }

    #[test]
    fn keyword_overlap_is_fraction_of_query() {
        assert_eq!(keyword_overlap(&words("coffee milk"), "likes coffee"), 0.5);
        assert_eq!(keyword_overlap(&words("coffee"), "Coffee!"), 1.0);
        assert_eq!(keyword_overlap(&words("the a"), "coffee"), 0.0);
    }
}
