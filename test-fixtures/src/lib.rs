//! Test support for the Synapse workspace: golden JSON fixtures and
//! deterministic stand-ins for every external collaborator.

pub mod fakes;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use fakes::{
    CountingEmbedder, FailingEmbedder, FailingScorer, FailingSink, FlakyFactStorage, HashEmbedder,
    RecordingSink, ScriptedExtractor, ScriptedScorer, SlowEmbedder, UnavailableEmbedder,
};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // From inside any crate, walk up to the workspace root.
    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// One raw extractor output and what the pipeline should make of it.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ExtractionCase {
    pub name: String,
    pub raw: String,
    /// `(key, text)` pairs expected after validation.
    pub expected: Vec<(String, String)>,
}

/// Consolidation decision expected for a total score.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BoundaryCase {
    pub permanence: f64,
    pub relevance: f64,
    pub identity: f64,
    pub total: f64,
    pub decision: String,
}
