//! Per-name buckets of prop references, swept in one pass.
//!
//! A bucket only ever grows by append. Removing a prop does not touch the
//! bucket; sweeps skip removed props and count each skip as a miss, and
//! once enough misses accumulate the bucket is compacted.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use im::Vector;
use parking_lot::RwLock;

use crate::prop::Prop;

/// Summary of one sweep over a bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Live props passed to the visitor.
    pub visited: usize,
    /// Removed props skipped.
    pub missed: usize,
    /// True if the visitor asked to stop before the end of the snapshot.
    pub stopped: bool,
}

impl SweepStats {
    /// Folds another sweep's counts into this one.
    pub fn absorb(&mut self, other: SweepStats) {
        self.visited += other.visited;
        self.missed += other.missed;
        self.stopped |= other.stopped;
    }
}

/// Append-mostly sequence of props sharing one name.
pub struct Bucket {
    name: Arc<str>,
    props: RwLock<Vector<Arc<Prop>>>,
    misses: AtomicU64,
}

impl Bucket {
    pub(crate) fn new(name: Arc<str>) -> Self {
        Self {
            name,
            props: RwLock::new(Vector::new()),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the attribute name this bucket indexes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn append(&self, prop: &Arc<Prop>) {
        self.props.write().push_back(Arc::clone(prop));
    }

    /// Visits every live prop present when the sweep starts.
    ///
    /// Membership is fixed by a snapshot taken under a brief read lock;
    /// liveness is checked again as each prop is reached, so props removed
    /// by an earlier visit are skipped. No lock is held while `visit` runs,
    /// so it may set, remove, delete or sweep freely. Returning `false`
    /// from `visit` ends the sweep.
    pub fn sweep<F>(&self, mut visit: F) -> SweepStats
    where
        F: FnMut(&Arc<Prop>) -> bool,
    {
        // O(1): the vector is persistent and shares structure with the original.
        let snapshot = self.props.read().clone();

        let mut stats = SweepStats::default();
        for prop in &snapshot {
            if prop.is_removed() {
                stats.missed += 1;
                self.misses.fetch_add(1, Ordering::Relaxed);
                continue;
            }
            stats.visited += 1;
            if !visit(prop) {
                stats.stopped = true;
                break;
            }
        }
        stats
    }

    /// Compacts the bucket if at least `threshold` misses have accumulated.
    ///
    /// Returns true if a compaction ran.
    pub fn try_compact(&self, threshold: u64) -> bool {
        if self.misses() < threshold {
            return false;
        }

        let mut props = self.props.write();
        // Another sweep may have compacted while we waited for the lock.
        if self.misses() < threshold {
            return false;
        }

        let before = props.len();
        let leading = props.iter().take_while(|p| p.is_removed()).count();
        if leading > 0 {
            *props = props.skip(leading);
        }
        props.retain(|p| !p.is_removed());
        let after = props.len();
        self.misses.store(0, Ordering::Relaxed);
        drop(props);

        tracing::debug!(name = %self.name, before, after, "compacted bucket");
        true
    }

    /// Returns the number of stored references, live or removed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.props.read().len()
    }

    /// Returns true if the bucket stores no references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.read().is_empty()
    }

    /// Returns the misses counted since the last compaction.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("misses", &self.misses())
            .finish()
    }
}
