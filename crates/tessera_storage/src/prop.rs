//! Props: named payloads attached to at most one entity.
//!
//! A prop is shared between its entity's table and, when the entity belongs
//! to a namespace, one bucket of the attribute index. The live flag is the
//! single source of truth for both: it starts set, is cleared exactly once,
//! and never comes back. Re-setting a name after a remove always allocates a
//! new prop, so a stale bucket reference can never observe a revived prop.
//!
//! A live prop keeps its entity alive, and detaching drops that link. So an
//! entity lives while a handle or any of its live props is reachable, and a
//! prop has an owner exactly when it is not removed.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tessera_foundation::{Error, ErrorContext, Result, Value};

use crate::entity::{Entity, EntityCell};

/// A named payload attached to an entity.
///
/// # Example
///
/// ```
/// use tessera_storage::Entity;
///
/// let sword = Entity::new();
/// let flame = sword.set("enchantedFlame", 3).unwrap();
/// assert_eq!(flame.name(), "enchantedFlame");
/// assert_eq!(flame.payload_as::<i64>().unwrap(), 3);
///
/// flame.remove();
/// assert!(flame.is_removed());
/// assert!(!sword.has("enchantedFlame"));
/// ```
pub struct Prop {
    name: Arc<str>,
    payload: RwLock<Value>,
    owner: Mutex<Option<Arc<EntityCell>>>,
    attached: AtomicBool,
}

impl Prop {
    /// Creates a live prop owned by `owner`.
    pub(crate) fn attached(name: Arc<str>, payload: Value, owner: &Arc<EntityCell>) -> Arc<Self> {
        Arc::new(Self {
            name,
            payload: RwLock::new(payload),
            owner: Mutex::new(Some(Arc::clone(owner))),
            attached: AtomicBool::new(true),
        })
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    /// Returns a copy of the payload.
    #[must_use]
    pub fn payload(&self) -> Value {
        self.payload.read().clone()
    }

    /// Calls `f` with the current payload.
    ///
    /// The payload is copied out first (O(1) for every variant), so `f` may
    /// read, write or remove this prop freely.
    pub fn with_payload<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.payload())
    }

    /// Returns the payload converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch error, tagged with this prop's name, if the
    /// payload does not hold the variant `T` expects.
    pub fn payload_as<T>(&self) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(self.payload()).map_err(|err| {
            err.with_context(
                ErrorContext::new()
                    .with_attribute(self.name())
                    .with_operation("payload_as"),
            )
        })
    }

    /// Overwrites the payload.
    pub fn set_payload(&self, value: impl Into<Value>) {
        *self.payload.write() = value.into();
    }

    /// Overwrites the payload with positional values collapsed by
    /// [`Value::collapse`].
    pub fn set_payload_all<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.set_payload(Value::collapse(values));
    }

    /// Returns the entity this prop is attached to, or `None` once removed.
    #[must_use]
    pub fn owner(&self) -> Option<Entity> {
        self.owner.lock().clone().map(Entity::from_cell)
    }

    /// Returns true once the prop has been detached from its entity.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        !self.attached.load(Ordering::Acquire)
    }

    /// Detaches the prop from its entity. Idempotent.
    ///
    /// The entity's table slot is only cleared if it still holds this prop;
    /// a newer prop set under the same name is left alone. Bucket references
    /// are cleaned up lazily by compaction.
    pub fn remove(&self) {
        if let Some(owner) = self.owner() {
            owner.release(self);
        }
        self.detach();
    }

    pub(crate) fn detach(&self) {
        // Flag and owner change together; the owner is dropped unlocked in
        // case it is the entity's last reference.
        let owner = {
            let mut slot = self.owner.lock();
            self.attached.store(false, Ordering::Release);
            slot.take()
        };
        drop(owner);
    }
}

impl AsRef<Prop> for Prop {
    fn as_ref(&self) -> &Prop {
        self
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prop")
            .field("name", &self.name)
            .field("payload", &*self.payload.read())
            .field("removed", &self.is_removed())
            .finish()
    }
}
