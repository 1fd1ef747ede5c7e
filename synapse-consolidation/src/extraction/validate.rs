//! Validation of parsed facts.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use synapse_core::config::ExtractionConfig;
use synapse_core::constants::{GENERIC_CATEGORY, IDENTITY_ROOT};
use synapse_core::models::ExtractedFact;
use tracing::debug;

use super::parse::RawFact;

/// Replies made only of acknowledgement phrases.
static ACK_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:ok(?:ay)?|thanks?|thank\s+you|got\s+it|sure|yes|yeah|yep|no|nope|noted|understood|sounds\s+good|great|cool|alright|you're\s+welcome|no\s+problem|hello|hi|hey|bye|goodbye)[\s,.!?]*)+$",
    )
    .ok()
});

pub fn is_acknowledgement(text: &str) -> bool {
    ACK_RE.as_ref().is_some_and(|re| re.is_match(text))
}

/// Lowercase, join whitespace with `_`, and prefix dot-less keys with
/// `user.general.`.
pub fn normalize_key(key: &str) -> Option<String> {
    let key = key
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let key = key.trim_matches('.');
    if key.is_empty() {
        return None;
    }
    if key.contains('.') {
        Some(key.to_string())
    } else {
        Some(format!("{IDENTITY_ROOT}.{GENERIC_CATEGORY}.{key}"))
    }
}

/// Keep facts with a usable key and a trimmed text within the length
/// bounds that is not an acknowledgement. Case-insensitive duplicates are
/// dropped, first occurrence wins.
pub fn validate(raw: Vec<RawFact>, config: &ExtractionConfig) -> Vec<ExtractedFact> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for fact in raw {
        let Some(text) = fact.text.as_deref().map(str::trim) else {
            continue;
        };
        let chars = text.chars().count();
        if chars < config.min_fact_chars || chars > config.max_fact_chars {
            debug!(chars, "extracted fact rejected: length");
            continue;
        }
        if is_acknowledgement(text) {
            debug!(text, "extracted fact rejected: acknowledgement");
            continue;
        }
        let Some(key) = fact.key.as_deref().and_then(normalize_key) else {
            debug!(text, "extracted fact rejected: missing key");
            continue;
        };
        let fingerprint = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        if !seen.insert(fingerprint) {
            continue;
        }
        out.push(ExtractedFact {
            key,
            text: text.to_string(),
        });
        if out.len() >= config.max_facts_per_extraction {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledgements() {
        assert!(is_acknowledgement("Thanks, got it!"));
        assert!(is_acknowledgement("ok"));
        assert!(is_acknowledgement("Sounds good."));
        assert!(!is_acknowledgement("Thanks to Maria, Sarah found a job"));
    }

    #[test]
    fn keys() {
        assert_eq!(normalize_key("pet").as_deref(), Some("user.general.pet"));
        assert_eq!(normalize_key(" User.Goals.Run ").as_deref(), Some("user.goals.run"));
        assert_eq!(normalize_key("home town").as_deref(), Some("user.general.home_town"));
        assert_eq!(normalize_key("  "), None);
    }

    #[test]
    fn cap_applies_after_filtering() {
        let config = ExtractionConfig {
            max_facts_per_extraction: 1,
            ..ExtractionConfig::default()
        };
        let raw = vec![
            RawFact { key: Some("user.a".into()), text: Some("ok".into()) },
            RawFact { key: Some("user.b".into()), text: Some("Plays the violin".into()) },
            RawFact { key: Some("user.c".into()), text: Some("Speaks Portuguese".into()) },
        ];
        let facts = validate(raw, &config);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].key, "user.b");
    }
}
