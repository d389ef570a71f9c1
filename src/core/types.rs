// src/core/types.rs
use std::collections::HashMap;

/// Key of the pseudo-category line holding per-category document totals.
pub const ALL_KEY: &str = "all";

/// Reserved token standing in for every word not seen during training.
pub const UNKNOWN_TOKEN: &str = "UNK";

/// A category (or token) name.
pub type Category = String;

/// Maps a key (token, or category for the totals line) to its occurrence count.
pub type CountTable = HashMap<String, u64>;

/// Aggregated counts as read from the upstream job. Transient: consumed once
/// to build a `ClassifierModel`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCounts {
    /// Number of training items seen per category (the `all` line).
    pub category_totals: CountTable,
    /// Per-category word counts, including the `UNK` bucket.
    pub word_counts: HashMap<Category, CountTable>,
}
