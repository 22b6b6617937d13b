//! Null-safe operations on optional entities and props.
//!
//! Lookups chain through `Option`: `entity.get("target")` may yield nothing,
//! and so may the target's owner. These traits let such chains keep going
//! without a check at every step. Reads on an absent receiver return
//! neutral values. Mutations that would silently lose data (setting a
//! value, renaming or re-payloading a prop) return an invalid-use error.
//!
//! ```
//! use tessera_storage::{Entity, OptionalEntity, OptionalProp};
//!
//! let goblin = Entity::new();
//! let target = goblin.get("target");
//! assert!(target.is_removed());
//! assert!(!target.owner().has("hp"));
//! assert!(target.owner().set("hp", 1).is_err());
//! ```

use std::borrow::Borrow;
use std::sync::Arc;

use tessera_foundation::{Error, Result, Value};

use crate::entity::Entity;
use crate::prop::Prop;

/// Entity operations on a possibly absent entity.
pub trait OptionalEntity {
    /// Like [`Entity::get`]; `None` when absent.
    fn get(&self, name: &str) -> Option<Arc<Prop>>;

    /// Like [`Entity::has`]; `false` when absent.
    fn has(&self, name: &str) -> bool;

    /// Like [`Entity::set`].
    ///
    /// # Errors
    ///
    /// Returns an invalid-use error when the entity is absent.
    fn set(&self, name: &str, value: impl Into<Value>) -> Result<Option<Arc<Prop>>>;

    /// Like [`Entity::remove`]; `None` when absent.
    fn remove(&self, name: &str) -> Option<Arc<Prop>>;

    /// Like [`Entity::delete`]; does nothing when absent.
    fn delete(&self);
}

impl<E: Borrow<Entity>> OptionalEntity for Option<E> {
    fn get(&self, name: &str) -> Option<Arc<Prop>> {
        self.as_ref()?.borrow().get(name)
    }

    fn has(&self, name: &str) -> bool {
        self.as_ref().is_some_and(|e| e.borrow().has(name))
    }

    fn set(&self, name: &str, value: impl Into<Value>) -> Result<Option<Arc<Prop>>> {
        match self {
            Some(e) => Ok(e.borrow().set(name, value)),
            None => Err(Error::invalid_use(format!("set {name:?} on an absent entity"))),
        }
    }

    fn remove(&self, name: &str) -> Option<Arc<Prop>> {
        self.as_ref()?.borrow().remove(name)
    }

    fn delete(&self) {
        if let Some(e) = self {
            e.borrow().delete();
        }
    }
}

/// Prop operations on a possibly absent prop.
pub trait OptionalProp {
    /// Like [`Prop::name`].
    ///
    /// # Errors
    ///
    /// Returns an invalid-use error when the prop is absent.
    fn name(&self) -> Result<&str>;

    /// Like [`Prop::payload`]; `None` when absent.
    fn payload(&self) -> Option<Value>;

    /// Like [`Prop::set_payload`].
    ///
    /// # Errors
    ///
    /// Returns an invalid-use error when the prop is absent.
    fn set_payload(&self, value: impl Into<Value>) -> Result<()>;

    /// Like [`Prop::owner`]; `None` when absent.
    fn owner(&self) -> Option<Entity>;

    /// Like [`Prop::is_removed`]; an absent prop counts as removed.
    fn is_removed(&self) -> bool;

    /// Like [`Prop::remove`]; does nothing when absent.
    fn remove(&self);
}

impl<P: AsRef<Prop>> OptionalProp for Option<P> {
    fn name(&self) -> Result<&str> {
        self.as_ref()
            .map(|p| p.as_ref().name())
            .ok_or_else(|| Error::invalid_use("name of an absent prop"))
    }

    fn payload(&self) -> Option<Value> {
        self.as_ref().map(|p| p.as_ref().payload())
    }

    fn set_payload(&self, value: impl Into<Value>) -> Result<()> {
        match self {
            Some(p) => {
                p.as_ref().set_payload(value);
                Ok(())
            }
            None => Err(Error::invalid_use("set payload of an absent prop")),
        }
    }

    fn owner(&self) -> Option<Entity> {
        self.as_ref()?.as_ref().owner()
    }

    fn is_removed(&self) -> bool {
        self.as_ref().is_none_or(|p| p.as_ref().is_removed())
    }

    fn remove(&self) {
        if let Some(p) = self {
            p.as_ref().remove();
        }
    }
}
