//! Configuration for a namespace's attribute index.

/// Misses a bucket tolerates before it compacts.
pub const DEFAULT_COMPACTION_THRESHOLD: u64 = 500;

/// Configuration for a [`crate::Namespace`].
///
/// Controls how eagerly buckets prune references to removed props.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceConfig {
    /// Number of removed props a bucket's sweeps must skip before the bucket
    /// is compacted. Never below 1.
    pub compaction_threshold: u64,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            compaction_threshold: DEFAULT_COMPACTION_THRESHOLD,
        }
    }
}

impl NamespaceConfig {
    /// Compacts after the first miss. Keeps buckets minimal at the cost of a
    /// structural write after most sweeps that see garbage.
    #[must_use]
    pub fn eager() -> Self {
        Self {
            compaction_threshold: 1,
        }
    }

    /// Tolerates a large backlog of removed props. Suits workloads that
    /// sweep very often and churn little.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            compaction_threshold: 20 * DEFAULT_COMPACTION_THRESHOLD,
        }
    }

    /// Builder method to set the compaction threshold (clamped to at least 1).
    #[must_use]
    pub fn with_compaction_threshold(mut self, threshold: u64) -> Self {
        self.compaction_threshold = threshold.max(1);
        self
    }
}
