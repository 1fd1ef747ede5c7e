//! # synapse-consolidation
//!
//! Moves short-term observations into long-term memory:
//! score (permanence, relevance, identity) → classify → key → decide.
//! Promotions also feed the concept graph. The `extraction` module turns
//! raw extractor output into validated pending facts.

pub mod engine;
pub mod extraction;
pub mod keys;
pub mod scoring;

pub use engine::{ConsolidationEngine, RunStats};
pub use extraction::ExtractionPipeline;
pub use keys::{category_for, classify_destination, generate_key};
pub use scoring::{decide, Destination};
