//! Destination classification and hierarchical key generation.

use synapse_core::constants::GENERIC_CATEGORY;
use synapse_core::models::{normalize_concept, FactType};
use synapse_core::text::{content_words, tokenize};
use synapse_graph::concepts::is_hierarchical_key;

/// Identity categories in match priority order.
const IDENTITY_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "preferences",
        &[
            "like", "likes", "love", "loves", "prefer", "prefers", "favorite", "favourite",
            "enjoy", "enjoys", "hate", "hates", "dislike", "dislikes",
        ],
    ),
    (
        "professional",
        &[
            "work", "works", "working", "job", "career", "engineer", "developer", "company",
            "office", "employed", "profession", "manager", "colleague", "colleagues", "boss",
        ],
    ),
    (
        "relationships",
        &[
            "wife", "husband", "partner", "friend", "friends", "mother", "father", "mom", "dad",
            "sister", "brother", "daughter", "son", "married", "girlfriend", "boyfriend",
            "family", "children", "kids",
        ],
    ),
    (
        "personal",
        &[
            "lives", "live", "born", "name", "named", "age", "birthday", "hometown", "city",
            "pet", "dog", "cat",
        ],
    ),
    (
        "health",
        &[
            "allergic", "allergy", "health", "diet", "vegetarian", "vegan", "exercise",
            "doctor", "medication", "sleep",
        ],
    ),
    (
        "goals",
        &[
            "want", "wants", "goal", "goals", "plan", "plans", "hope", "hopes", "dream",
            "dreams", "aspire", "aspires",
        ],
    ),
];

/// Philosophy categories in match priority order.
const PHILOSOPHY_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "values",
        &[
            "value", "values", "honesty", "integrity", "matters", "important", "prioritize",
            "prioritizes",
        ],
    ),
    (
        "ethics",
        &[
            "ethic", "ethics", "ethical", "moral", "morals", "morality", "fairness", "justice",
        ],
    ),
    ("principles", &["principle", "principles", "motto", "guideline"]),
    (
        "beliefs",
        &[
            "believe", "believes", "belief", "beliefs", "faith", "convinced", "conviction",
            "spiritual", "religion", "religious",
        ],
    ),
];

fn first_match(tokens: &[String], table: &[(&'static str, &[&str])]) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, vocabulary)| tokens.iter().any(|t| vocabulary.contains(&t.as_str())))
        .map(|(category, _)| *category)
}

/// Belief, value, ethics or principle vocabulary → philosophy; anything else
/// (ambiguous included) → identity.
pub fn classify_destination(text: &str) -> FactType {
    let tokens = tokenize(text);
    if first_match(&tokens, PHILOSOPHY_CATEGORIES).is_some() {
        FactType::Philosophy
    } else {
        FactType::Identity
    }
}

/// Category within the destination root, `general` when nothing matches.
pub fn category_for(text: &str, fact_type: FactType) -> &'static str {
    let tokens = tokenize(text);
    let table = match fact_type {
        FactType::Identity => IDENTITY_CATEGORIES,
        FactType::Philosophy => PHILOSOPHY_CATEGORIES,
    };
    first_match(&tokens, table).unwrap_or(GENERIC_CATEGORY)
}

/// `<root>.<category>.<up to max_tokens content words>`.
///
/// A well-formed `existing` key under the same root wins. Texts without
/// content words get a short content hash as their leaf.
pub fn generate_key(
    text: &str,
    fact_type: FactType,
    existing: Option<&str>,
    max_tokens: usize,
) -> String {
    let root = fact_type.key_root();
    if let Some(key) = existing.map(normalize_concept) {
        if is_well_formed_under(&key, root) {
            return key;
        }
    }

    let category = category_for(text, fact_type);
    let words: Vec<String> = content_words(text)
        .into_iter()
        .take(max_tokens.max(1))
        .collect();
    if words.is_empty() {
        let hash = blake3::hash(text.trim().as_bytes()).to_hex();
        return format!("{root}.{category}.{}", &hash.as_str()[..8]);
    }
    format!("{root}.{category}.{}", words.join("."))
}

fn is_well_formed_under(key: &str, root: &str) -> bool {
    is_hierarchical_key(key)
        && key.split('.').next() == Some(root)
        && key
            .split('.')
            .all(|s| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn honesty_is_a_value() {
        let text = "User believes honesty matters most";
        assert_eq!(classify_destination(text), FactType::Philosophy);
        assert_eq!(category_for(text, FactType::Philosophy), "values");
        assert_eq!(
            generate_key(text, FactType::Philosophy, None, 4),
            "philosophy.values.believes.honesty.matters"
        );
    }

    #[test]
    fn ambiguous_text_defaults_to_identity_general() {
        let text = "Sarah drove to Porto yesterday";
        assert_eq!(classify_destination(text), FactType::Identity);
        assert_eq!(category_for(text, FactType::Identity), "general");
    }

    #[test]
    fn key_is_capped_at_max_tokens() {
        let key = generate_key(
            "Sarah likes strong black coffee every morning",
            FactType::Identity,
            None,
            4,
        );
        assert_eq!(key.split('.').count(), 6);
        assert!(key.starts_with("user.preferences.sarah.likes"));
    }

    #[test]
    fn existing_key_kept_only_under_same_root() {
        let kept = generate_key(
            "likes coffee",
            FactType::Identity,
            Some("user.preferences.coffee"),
            4,
        );
        assert_eq!(kept, "user.preferences.coffee");

        let replaced = generate_key(
            "believes in honesty",
            FactType::Philosophy,
            Some("user.general.honesty"),
            4,
        );
        assert!(replaced.starts_with("philosophy."));

        let malformed = generate_key("likes coffee", FactType::Identity, Some("user..x"), 4);
        assert_eq!(malformed, "user.preferences.likes.coffee");
    }

    #[test]
    fn stop_word_only_text_gets_hashed_leaf() {
        let key = generate_key("it is what it is", FactType::Identity, None, 4);
        assert!(key.starts_with("user.general."));
        assert_eq!(key.rsplit('.').next().map(str::len), Some(8));
    }
}
