// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "synapse.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Graph ---
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_DECAY_FACTOR: f64 = 0.95;
pub const DEFAULT_MIN_LINK_STRENGTH: f64 = 0.05;
pub const DEFAULT_MAX_CONCEPTS_PER_FACT: usize = 8;
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.05;
pub const DEFAULT_MAX_HOPS: usize = 2;
pub const DEFAULT_ACTIVATION_LIMIT: usize = 20;
pub const DEFAULT_HIERARCHICAL_BOOST: f64 = 0.8;
pub const DEFAULT_COOCCURRENCE_CAP: f64 = 0.3;
pub const DEFAULT_COOCCURRENCE_SCALE: f64 = 0.03;

// --- Relevance ---
pub const DEFAULT_EMBEDDING_WEIGHT: f64 = 0.5;
pub const DEFAULT_EMBEDDING_SOLE_WEIGHT: f64 = 0.7;
pub const DEFAULT_COOCCURRENCE_WEIGHT: f64 = 0.3;
pub const DEFAULT_SPREAD_WEIGHT: f64 = 0.2;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.1;
pub const DEFAULT_KEYWORD_SOLE_WEIGHT: f64 = 1.0;
pub const DEFAULT_TOP_CONCEPTS: usize = 5;

// --- Embeddings ---
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_EMBEDDING_BREAKER_COOLDOWN_MS: u64 = 30_000;
pub const DEFAULT_MAX_PENDING_DEGRADATIONS: usize = 256;

// --- Consolidation ---
pub const DEFAULT_L2_THRESHOLD: f64 = 4.0;
pub const DEFAULT_L3_THRESHOLD: f64 = 3.0;
pub const DEFAULT_DISCARD_THRESHOLD: f64 = 2.0;
pub const DEFAULT_MAX_FACTS_PER_RUN: usize = 50;
pub const DEFAULT_MAX_KEY_TOKENS: usize = 4;

// --- Extraction ---
pub const DEFAULT_EXTRACTION_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_MIN_FACT_CHARS: usize = 10;
pub const DEFAULT_MAX_FACT_CHARS: usize = 500;
pub const DEFAULT_MAX_FACTS_PER_EXTRACTION: usize = 20;
pub const DEFAULT_INBOX_CAPACITY: usize = 256;

// --- Scheduler ---
pub const DEFAULT_CONSOLIDATION_INTERVAL_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_DECAY_INTERVAL_SECS: u64 = 86_400; // 1 day
pub const DEFAULT_EXTRACTION_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MAX_BACKOFF_SECS: u64 = 3_600;
pub const DEFAULT_MAX_CONSECUTIVE_ERRORS: u32 = 5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
