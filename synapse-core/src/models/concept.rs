use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weighted, undirected association between two concepts.
///
/// Stored with `concept_a < concept_b`; use [`canonical_pair`] to build keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptLink {
    pub concept_a: String,
    pub concept_b: String,
    pub strength: f64,
    pub fire_count: u64,
    pub last_fired: DateTime<Utc>,
}

impl ConceptLink {
    /// The endpoint opposite `concept`, if `concept` is one of the endpoints.
    pub fn other(&self, concept: &str) -> Option<&str> {
        if self.concept_a == concept {
            Some(&self.concept_b)
        } else if self.concept_b == concept {
            Some(&self.concept_a)
        } else {
            None
        }
    }
}

/// A node of the concept graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptNode {
    pub name: String,
    pub mention_count: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Co-occurrence counter for an unordered pair of keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoOccurrencePair {
    pub key_a: String,
    pub key_b: String,
    pub count: u64,
    pub last_seen: DateTime<Utc>,
}

/// A concept reached by spread activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatedConcept {
    pub concept: String,
    pub activation: f64,
    /// Seed first, this concept last.
    pub path: Vec<String>,
}

/// Trim and lowercase a concept name.
pub fn normalize_concept(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize both names and order them lexically.
///
/// Returns `None` for empty names and self pairs.
pub fn canonical_pair(a: &str, b: &str) -> Option<(String, String)> {
    let a = normalize_concept(a);
    let b = normalize_concept(b);
    if a.is_empty() || b.is_empty() || a == b {
        return None;
    }
    if a < b {
        Some((a, b))
    } else {
        Some((b, a))
    }
}
