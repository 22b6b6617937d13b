//! Attribute index: name to bucket.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::bucket::{Bucket, SweepStats};
use crate::config::NamespaceConfig;
use crate::prop::Prop;

/// Maps each attribute name to the bucket of props carrying it.
///
/// Buckets are created on first append and live as long as the index.
#[derive(Debug, Default)]
pub struct PropIndex {
    config: NamespaceConfig,
    buckets: RwLock<HashMap<Arc<str>, Arc<Bucket>>>,
}

impl PropIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new(config: NamespaceConfig) -> Self {
        Self {
            config,
            buckets: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the configuration this index compacts with.
    #[must_use]
    pub fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    /// Appends `prop` to the bucket for its name, creating the bucket if needed.
    pub(crate) fn append(&self, prop: &Arc<Prop>) {
        self.bucket_or_create(prop.name_arc()).append(prop);
    }

    fn bucket_or_create(&self, name: &Arc<str>) -> Arc<Bucket> {
        if let Some(bucket) = self.buckets.read().get(name) {
            return Arc::clone(bucket);
        }
        let mut buckets = self.buckets.write();
        Arc::clone(buckets.entry(Arc::clone(name)).or_insert_with(|| {
            tracing::trace!(name = %name, "created bucket");
            Arc::new(Bucket::new(Arc::clone(name)))
        }))
    }

    /// Returns the bucket for `name`, if one exists.
    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<Arc<Bucket>> {
        self.buckets.read().get(name).cloned()
    }

    /// Sweeps the bucket for `name`, then compacts it if enough misses have
    /// accumulated. A name without a bucket sweeps nothing.
    pub fn sweep<F>(&self, name: &str, visit: F) -> SweepStats
    where
        F: FnMut(&Arc<Prop>) -> bool,
    {
        let Some(bucket) = self.bucket(name) else {
            return SweepStats::default();
        };
        let stats = bucket.sweep(visit);
        bucket.try_compact(self.config.compaction_threshold);
        stats
    }

    /// Returns the names that have a bucket, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<Arc<str>> {
        let mut names: Vec<Arc<str>> = self.buckets.read().keys().cloned().collect();
        names.sort();
        names
    }
}
