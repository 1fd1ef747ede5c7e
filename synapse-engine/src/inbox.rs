//! Bounded queue of conversations waiting for fact extraction.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use synapse_core::errors::{ExtractionError, SynapseResult};

#[derive(Debug, Clone)]
pub struct Conversation {
    pub session_id: String,
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

pub struct Inbox {
    queue: Mutex<VecDeque<Conversation>>,
    capacity: usize,
}

impl Inbox {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Queue a conversation. Rejects with `InboxFull` at capacity.
    pub fn push(&self, session_id: &str, text: &str) -> SynapseResult<usize> {
        let mut queue = self.lock();
        if queue.len() >= self.capacity {
            return Err(ExtractionError::InboxFull {
                capacity: self.capacity,
            }
            .into());
        }
        queue.push_back(Conversation {
            session_id: session_id.to_string(),
            text: text.to_string(),
            submitted_at: Utc::now(),
        });
        Ok(queue.len())
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Conversation> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Conversation>> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::errors::SynapseError;

    #[test]
    fn rejects_past_capacity() {
        let inbox = Inbox::new(2);
        inbox.push("s1", "one").unwrap();
        inbox.push("s1", "two").unwrap();
        let err = inbox.push("s1", "three").unwrap_err();
        assert!(matches!(
            err,
            SynapseError::ExtractionError(ExtractionError::InboxFull { capacity: 2 })
        ));
    }

    #[test]
    fn drain_is_fifo_and_frees_capacity() {
        let inbox = Inbox::new(2);
        inbox.push("s1", "one").unwrap();
        inbox.push("s2", "two").unwrap();
        let texts: Vec<String> = inbox.drain().into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert!(inbox.is_empty());
        assert_eq!(inbox.push("s3", "three").unwrap(), 1);
    }
}
