//! # synapse-graph
//!
//! Weighted concept graph: Hebbian reinforcement, multiplicative decay,
//! co-occurrence counters, and hop-bounded spread activation over either
//! the persisted graph or an in-memory petgraph snapshot.

pub mod activation;
pub mod concepts;
pub mod snapshot;
pub mod store;

pub use activation::SpreadActivation;
pub use snapshot::ConceptGraph;
pub use store::GraphStore;

use synapse_core::errors::SynapseResult;

/// Anything spread activation can walk.
pub trait NeighborSource {
    /// Neighbors on either side with `strength >= min_strength`, strongest
    /// first, ties by name.
    fn neighbors(&self, concept: &str, min_strength: f64) -> SynapseResult<Vec<(String, f64)>>;

    /// Concepts named `prefix.*`, sorted.
    fn children_of(&self, prefix: &str) -> SynapseResult<Vec<String>>;
}
