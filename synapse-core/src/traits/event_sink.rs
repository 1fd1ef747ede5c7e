use crate::errors::SynapseResult;
use crate::models::OperationalEvent;

/// Destination of operational events. Callers ignore failures.
pub trait IEventSink: Send + Sync {
    fn emit(&self, event: &OperationalEvent) -> SynapseResult<()>;
}
