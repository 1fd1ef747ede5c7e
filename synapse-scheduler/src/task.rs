use std::fmt;

use serde::{Deserialize, Serialize};
use synapse_core::errors::SynapseResult;

/// Every periodic task the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Consolidation,
    Decay,
    MemoryExtraction,
    Health,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Consolidation,
        TaskKind::Decay,
        TaskKind::MemoryExtraction,
        TaskKind::Health,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consolidation => "consolidation",
            Self::Decay => "decay",
            Self::MemoryExtraction => "memory_extraction",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of periodic work. `run` is blocking and executes on the
/// blocking thread pool.
pub trait PeriodicTask: Send + Sync + 'static {
    fn kind(&self) -> TaskKind;

    fn run(&self) -> SynapseResult<()>;
}
