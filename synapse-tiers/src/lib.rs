//! # synapse-tiers
//!
//! Owns fact rows: pending observations awaiting consolidation, long-term
//! facts at three levels of detail (L1 terse to L3 detailed), and the
//! append-only consolidation history.

pub mod promotion;
pub mod store;

pub use promotion::Promotion;
pub use store::TieredFactStore;
