use crate::errors::SynapseResult;

/// Produces raw fact-extraction output for a conversation.
///
/// The output is untrusted text; callers parse it defensively. `correction`
/// carries a corrective instruction when the previous attempt was malformed.
pub trait IFactExtractor: Send + Sync {
    fn extract(&self, conversation_text: &str, correction: Option<&str>) -> SynapseResult<String>;
}
