//! # synapse-core
//!
//! Foundation crate for the Synapse memory engine.
//! Defines all records, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SynapseConfig;
pub use errors::{SynapseError, SynapseResult};
pub use models::{
    ConceptLink, ConsolidationHistoryRecord, FactStatus, FactType, HeaLevel, LongTermFact,
    PendingFact, ScoreBreakdown,
};
