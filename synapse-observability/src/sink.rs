use synapse_core::errors::SynapseResult;
use synapse_core::models::OperationalEvent;
use synapse_core::traits::IEventSink;

/// Writes operational events to the log instead of storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl IEventSink for TracingSink {
    fn emit(&self, event: &OperationalEvent) -> SynapseResult<()> {
        tracing::info!(
            event = %event.kind,
            payload = %event.payload,
            created_at = %event.created_at.to_rfc3339(),
            "operational event"
        );
        Ok(())
    }
}
