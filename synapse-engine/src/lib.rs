//! # synapse-engine
//!
//! [`Engine`] owns configuration, storage, the concept graph, the tiered
//! fact store, the relevance scorer, consolidation and the extraction inbox.
//! [`Runtime`] pairs an engine with the scheduler built from the explicit
//! task table in [`tasks`].

pub mod builder;
pub mod engine;
pub mod inbox;
pub mod runtime;
pub mod tasks;

pub use builder::EngineBuilder;
pub use engine::{Engine, ExtractionStats, IngestReport};
pub use inbox::{Conversation, Inbox};
pub use runtime::Runtime;
pub use tasks::{build_scheduler, task_table};
