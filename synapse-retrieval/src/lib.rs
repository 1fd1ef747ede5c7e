//! # synapse-retrieval
//!
//! Ranks candidate facts against a query by fusing up to four signals with
//! fixed weights. A missing dependency drops its signal; scoring itself
//! never fails.

pub mod candidate;
pub mod scorer;
pub mod signal;

pub use candidate::ScoringText;
pub use scorer::{RelevanceScorer, ScoredFact};
pub use signal::{Signal, SignalBreakdown};
