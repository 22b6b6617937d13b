//! Entity identifiers.

use std::fmt;

/// Identifier a namespace assigns to each entity it issues.
///
/// Ids are unique within one namespace and never reused, so a stored id
/// either resolves to the entity it was taken from or to nothing.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct EntityId {
    /// Position in the namespace's issue order.
    pub index: u64,
}

impl EntityId {
    /// Creates an entity id with the given index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.index)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.index)
    }
}
