//! Entities: concurrent name-to-prop tables with a one-way delete.
//!
//! Each entity carries two locks. The lifecycle lock is taken shared by
//! set and remove and exclusively by delete, which makes delete a strict
//! boundary: every set either finishes (bucket append included) before the
//! delete detaches its props, or observes the deleted flag and does
//! nothing. The table lock only guards the map itself and is never held
//! while touching a bucket.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tessera_foundation::{EntityId, Value};

use crate::namespace::{Namespace, NamespaceCore};
use crate::prop::Prop;

/// Shared state behind every [`Entity`] handle.
pub(crate) struct EntityCell {
    id: Option<EntityId>,
    lifecycle: RwLock<Lifecycle>,
    table: RwLock<HashMap<Arc<str>, Arc<Prop>>>,
}

struct Lifecycle {
    deleted: bool,
    namespace: Option<Weak<NamespaceCore>>,
}

impl Drop for EntityCell {
    fn drop(&mut self) {
        let namespace = self.lifecycle.get_mut().namespace.as_ref().and_then(Weak::upgrade);
        if let (Some(core), Some(id)) = (namespace, self.id) {
            core.forget(id);
        }
    }
}

/// Handle to an entity.
///
/// Cloning is cheap and every clone refers to the same entity. Two handles
/// compare equal only if they refer to the same entity.
///
/// An entity stays alive while any handle exists or while it holds a live
/// prop, since live props point back at their owner. Once every prop is
/// removed and every handle dropped, the entity is freed and leaves its
/// namespace. A standalone entity that still holds props is kept alive by
/// them; [`Entity::delete`] releases it.
#[derive(Clone)]
pub struct Entity {
    cell: Arc<EntityCell>,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    /// Creates a standalone entity.
    ///
    /// Standalone entities hold props like any other but belong to no
    /// namespace, so their props are never visited by a sweep.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lifecycle(None, None)
    }

    /// Creates an entity bound to `core`.
    pub(crate) fn bound(id: EntityId, core: &Arc<NamespaceCore>) -> Self {
        Self::with_lifecycle(Some(id), Some(Arc::downgrade(core)))
    }

    fn with_lifecycle(id: Option<EntityId>, namespace: Option<Weak<NamespaceCore>>) -> Self {
        Self {
            cell: Arc::new(EntityCell {
                id,
                lifecycle: RwLock::new(Lifecycle {
                    deleted: false,
                    namespace,
                }),
                table: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub(crate) fn from_cell(cell: Arc<EntityCell>) -> Self {
        Self { cell }
    }

    pub(crate) fn downgrade(&self) -> Weak<EntityCell> {
        Arc::downgrade(&self.cell)
    }

    /// Returns the id the namespace issued, or `None` for a standalone entity.
    #[must_use]
    pub fn id(&self) -> Option<EntityId> {
        self.cell.id
    }

    /// Sets `name` to `value` and returns the prop now holding it.
    ///
    /// A live prop already stored under `name` is reused with its payload
    /// overwritten. Otherwise a new prop is created and, if the entity
    /// belongs to a namespace, appended to that name's bucket.
    ///
    /// Returns `None` without side effects once the entity is deleted.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Option<Arc<Prop>> {
        self.put(name, value.into())
    }

    /// Sets `name` as a key-only tag with a nil payload.
    pub fn tag(&self, name: &str) -> Option<Arc<Prop>> {
        self.put(name, Value::Nil)
    }

    /// Sets `name` to positional values collapsed by [`Value::collapse`].
    pub fn set_all<I>(&self, name: &str, values: I) -> Option<Arc<Prop>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.put(name, Value::collapse(values))
    }

    fn put(&self, name: &str, value: Value) -> Option<Arc<Prop>> {
        let lifecycle = self.cell.lifecycle.read();
        if lifecycle.deleted {
            return None;
        }

        let mut table = self.cell.table.write();
        if let Some(existing) = table.get(name).filter(|p| !p.is_removed()) {
            let existing = Arc::clone(existing);
            drop(table);
            existing.set_payload(value);
            return Some(existing);
        }

        // A removed prop left in the slot is replaced, never revived.
        let prop = Prop::attached(Arc::from(name), value, &self.cell);
        table.insert(Arc::clone(prop.name_arc()), Arc::clone(&prop));
        drop(table);

        if let Some(core) = lifecycle.namespace.as_ref().and_then(Weak::upgrade) {
            core.index().append(&prop);
        }
        Some(prop)
    }

    /// Returns the live prop stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Prop>> {
        self.cell
            .table
            .read()
            .get(name)
            .filter(|p| !p.is_removed())
            .cloned()
    }

    /// Returns true if a live prop is stored under `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes and returns the prop stored under `name`.
    ///
    /// The prop is detached but stays in its bucket until compaction.
    pub fn remove(&self, name: &str) -> Option<Arc<Prop>> {
        let lifecycle = self.cell.lifecycle.read();
        if lifecycle.deleted {
            return None;
        }
        let prop = self.cell.table.write().remove(name)?;
        prop.detach();
        Some(prop)
    }

    /// Clears the table slot for `prop`, if it still holds that exact prop.
    pub(crate) fn release(&self, prop: &Prop) {
        let lifecycle = self.cell.lifecycle.read();
        if lifecycle.deleted {
            return;
        }
        let mut table = self.cell.table.write();
        if table
            .get(prop.name())
            .is_some_and(|held| std::ptr::eq(Arc::as_ptr(held), prop))
        {
            table.remove(prop.name());
        }
    }

    /// Deletes the entity. Idempotent.
    ///
    /// Every held prop is detached, the table is discarded and the entity
    /// leaves its namespace. Later sets and removes are ignored.
    pub fn delete(&self) {
        let mut lifecycle = self.cell.lifecycle.write();
        if lifecycle.deleted {
            return;
        }
        lifecycle.deleted = true;

        let table = std::mem::take(&mut *self.cell.table.write());
        let detached = table.len();
        for prop in table.into_values() {
            prop.detach();
        }

        let namespace = lifecycle.namespace.take();
        drop(lifecycle);

        if let (Some(core), Some(id)) = (namespace.as_ref().and_then(Weak::upgrade), self.id()) {
            core.forget(id);
        }
        tracing::debug!(entity = ?self.id(), detached, "entity deleted");
    }

    /// Returns true once [`Entity::delete`] has run.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.cell.lifecycle.read().deleted
    }

    /// Returns the number of live props.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cell
            .table
            .read()
            .values()
            .filter(|p| !p.is_removed())
            .count()
    }

    /// Returns true if the entity holds no live props.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the names holding live props, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<Arc<str>> {
        let mut names: Vec<Arc<str>> = self
            .cell
            .table
            .read()
            .iter()
            .filter(|(_, p)| !p.is_removed())
            .map(|(name, _)| Arc::clone(name))
            .collect();
        names.sort();
        names
    }

    /// Returns the namespace this entity belongs to.
    ///
    /// `None` for standalone and deleted entities, and once the namespace
    /// itself has been dropped.
    #[must_use]
    pub fn namespace(&self) -> Option<Namespace> {
        self.cell
            .lifecycle
            .read()
            .namespace
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Namespace::from_core)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl Eq for Entity {}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Entity");
        match self.id() {
            Some(id) => s.field("id", &id),
            None => s.field("id", &"standalone"),
        };
        s.field("props", &self.len())
            .field("deleted", &self.is_deleted())
            .finish()
    }
}
