//! Namespaces: isolated scopes that issue entities and own their index.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tessera_foundation::EntityId;

use crate::bucket::{Bucket, SweepStats};
use crate::config::NamespaceConfig;
use crate::entity::{Entity, EntityCell};
use crate::index::PropIndex;
use crate::prop::Prop;

/// State shared by every handle to one namespace.
///
/// Tracks the entities it issued without owning them; an entry is removed
/// when its entity is deleted or freed. Entities and props point back here
/// only weakly, so dropping the last [`Namespace`] handle releases the
/// whole scope.
pub(crate) struct NamespaceCore {
    index: PropIndex,
    entities: RwLock<HashMap<EntityId, Weak<EntityCell>>>,
    next_id: AtomicU64,
}

impl NamespaceCore {
    pub(crate) fn index(&self) -> &PropIndex {
        &self.index
    }

    pub(crate) fn forget(&self, id: EntityId) {
        self.entities.write().remove(&id);
    }
}

/// An isolated scope of entities sharing one attribute index.
///
/// Cloning is cheap and clones share the same scope. There is no global
/// namespace; create one per simulation and pass it where it is needed.
///
/// # Example
///
/// ```
/// use tessera_storage::Namespace;
///
/// let ns = Namespace::new();
/// for speed in [1.0, 2.5] {
///     ns.new_entity().set("velocity", speed);
/// }
///
/// let mut total = 0.0;
/// ns.sweep("velocity", |p| {
///     total += p.payload().as_float().unwrap_or_default();
///     true
/// });
/// assert_eq!(total, 3.5);
/// ```
#[derive(Clone)]
pub struct Namespace {
    core: Arc<NamespaceCore>,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Creates a namespace with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NamespaceConfig::default())
    }

    /// Creates a namespace with a custom configuration.
    #[must_use]
    pub fn with_config(config: NamespaceConfig) -> Self {
        Self {
            core: Arc::new(NamespaceCore {
                index: PropIndex::new(config),
                entities: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn from_core(core: Arc<NamespaceCore>) -> Self {
        Self { core }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NamespaceConfig {
        self.core.index.config()
    }

    /// Creates an entity bound to this namespace.
    ///
    /// Handles may be dropped freely while the entity holds props: each live
    /// prop keeps its owner alive, so it stays reachable through sweeps and
    /// [`Prop::owner`]. An entity with no handles and no live props is freed
    /// and leaves the namespace.
    #[must_use]
    pub fn new_entity(&self) -> Entity {
        let id = EntityId::new(self.core.next_id.fetch_add(1, Ordering::Relaxed));
        let entity = Entity::bound(id, &self.core);
        self.core.entities.write().insert(id, entity.downgrade());
        entity
    }

    /// Looks up a live entity by id.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        let cell = self.core.entities.read().get(&id).and_then(Weak::upgrade)?;
        Some(Entity::from_cell(cell))
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.entities.read().len()
    }

    /// Returns true if the namespace holds no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.entities.read().is_empty()
    }

    /// Visits every live prop named `name`. See [`Bucket::sweep`].
    pub fn sweep<F>(&self, name: &str, visit: F) -> SweepStats
    where
        F: FnMut(&Arc<Prop>) -> bool,
    {
        self.core.index.sweep(name, visit)
    }

    /// Counts the live props named `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.sweep(name, |_| true).visited
    }

    /// Returns the bucket for `name`, if any prop with that name was ever set.
    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<Arc<Bucket>> {
        self.core.index.bucket(name)
    }

    /// Returns the number of references stored for `name`, live or removed.
    #[must_use]
    pub fn bucket_len(&self, name: &str) -> usize {
        self.bucket(name).map_or(0, |b| b.len())
    }

    /// Returns every name that has a bucket, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<Arc<str>> {
        self.core.index.names()
    }

    /// Returns the attribute index.
    #[must_use]
    pub fn index(&self) -> &PropIndex {
        &self.core.index
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}

impl Eq for Namespace {}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("entities", &self.len())
            .field("names", &self.names())
            .field("config", self.config())
            .finish()
    }
}
