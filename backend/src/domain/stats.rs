//! Application-wide usage counters.

use serde::{Deserialize, Serialize};

/// Snapshot of the singleton usage-counter record.
///
/// Both counters are non-negative and monotonically non-decreasing:
/// `search_count` counts executed searches, `favorite_count` counts
/// add-to-favorites events (removals do not change it). Atomicity of
/// concurrent increments is whatever the backing store's increment
/// primitive provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Number of searches executed since the record was created.
    pub search_count: u64,
    /// Number of add-to-favorites events since the record was created.
    pub favorite_count: u64,
}
