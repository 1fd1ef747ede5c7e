//! # synapse-embeddings
//!
//! Wraps the external embedding provider: an in-process L1 cache keyed by
//! the blake3 hash of the input, a call timeout, and a log of degradation
//! events for the health reporter.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod similarity;

pub use engine::EmbeddingEngine;
pub use similarity::cosine_similarity;
