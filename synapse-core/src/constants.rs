/// Synapse system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Links never reach 1.0; Hebbian reinforcement is capped just below it.
pub const MAX_LINK_STRENGTH: f64 = 1.0 - 1e-9;

/// Activation assigned to seed concepts.
pub const SEED_ACTIVATION: f64 = 1.0;

/// Level number recorded in history for facts that were still pending.
pub const PENDING_LEVEL: u8 = 0;

/// Level number recorded in history for discarded facts.
pub const DISCARDED_LEVEL: u8 = 0;

/// Root prefix of identity fact keys.
pub const IDENTITY_ROOT: &str = "user";

/// Root prefix of philosophy fact keys.
pub const PHILOSOPHY_ROOT: &str = "philosophy";

/// Bucket used when no category keyword matches.
pub const GENERIC_CATEGORY: &str = "general";

/// Minimum and maximum value of a single scoring dimension.
pub const MIN_DIMENSION_SCORE: f64 = 1.0;
pub const MAX_DIMENSION_SCORE: f64 = 5.0;
