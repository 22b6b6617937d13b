//! Type descriptors for payload inspection.

use std::fmt;

/// Describes which variant a [`crate::Value`] holds.
///
/// Payloads carry no schema; `Type` exists so typed accessors can report
/// what they expected and what they found.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Entity reference type.
    EntityRef,
    /// Ordered sequence of values.
    Vec,
    /// Key/value map.
    Map,
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::EntityRef => write!(f, "entity-ref"),
            Self::Vec => write!(f, "vec"),
            Self::Map => write!(f, "map"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
