mod concept;
mod degradation_event;
mod extracted_fact;
mod health_report;
mod history;
mod long_term_fact;
mod operational_event;
mod pending_fact;
mod score;

pub use concept::{
    canonical_pair, normalize_concept, ActivatedConcept, CoOccurrencePair, ConceptLink,
    ConceptNode,
};
pub use degradation_event::DegradationEvent;
pub use extracted_fact::ExtractedFact;
pub use health_report::{HealthMetrics, HealthReport, HealthStatus, SubsystemHealth};
pub use history::ConsolidationHistoryRecord;
pub use long_term_fact::{FactType, HeaLevel, LongTermFact};
pub use operational_event::OperationalEvent;
pub use pending_fact::{FactStatus, PendingFact};
pub use score::{FactScore, ScoreBreakdown};
