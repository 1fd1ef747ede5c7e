use std::borrow::Cow;

use synapse_core::models::{LongTermFact, PendingFact};

/// Text a candidate is scored on, plus an optional graph key for it.
pub trait ScoringText {
    fn scoring_text(&self) -> Cow<'_, str>;

    /// A concept node standing for the whole candidate, if any.
    fn concept_key(&self) -> Option<&str> {
        None
    }
}

impl ScoringText for LongTermFact {
    fn scoring_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.detailed_text())
    }

    fn concept_key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

impl ScoringText for PendingFact {
    fn scoring_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn concept_key(&self) -> Option<&str> {
        self.hier_key.as_deref()
    }
}

impl ScoringText for String {
    fn scoring_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ScoringText for &str {
    fn scoring_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}
