//! Concept extraction from free text.

use synapse_core::text::is_stop_word;

/// Tokens shorter than this carry too little signal to become nodes.
pub const MIN_CONCEPT_CHARS: usize = 3;

/// Extract up to `max` concepts from `text`, in order of first appearance.
///
/// Dots survive only inside hierarchical keys such as
/// `user.preferences.coffee`; anywhere else they split words.
pub fn extract_concepts(text: &str, max: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut out: Vec<String> = Vec::new();
    let push = |candidate: &str, out: &mut Vec<String>| {
        if out.len() < max
            && candidate.chars().count() >= MIN_CONCEPT_CHARS
            && !is_stop_word(candidate)
            && !out.iter().any(|c| c == candidate)
        {
            out.push(candidate.to_string());
        }
    };

    for raw in lowered.split(|c: char| !(c.is_alphanumeric() || c == '.' || c == '_')) {
        let token = raw.trim_matches(|c: char| c == '.' || c == '_');
        if token.is_empty() {
            continue;
        }
        if is_hierarchical_key(token) {
            push(token, &mut out);
        } else {
            for word in token.split(|c: char| c == '.' || c == '_') {
                push(word, &mut out);
            }
        }
        if out.len() >= max {
            break;
        }
    }
    out
}

/// At least two non-empty dot-separated segments, the first a real word.
pub fn is_hierarchical_key(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() >= 2
        && segments.iter().all(|s| !s.is_empty())
        && segments[0].chars().count() >= MIN_CONCEPT_CHARS
        && segments[0].chars().all(|c| c.is_alphabetic())
}
