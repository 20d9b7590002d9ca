use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A graph vertex: a user-assigned name plus an opaque payload.
///
/// Identity is the name. Equality and hashing look at the name only, so the
/// payload never needs `Eq` or `Hash` and the engine never inspects it.
/// Nodes are immutable once built.
#[derive(Debug, Clone)]
pub struct Node<T> {
    name: String,
    payload: T,
}

impl<T> Node<T> {
    pub fn new(name: impl Into<String>, payload: T) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the node, returning its payload.
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// A blank name stands in for an absent node reference.
    pub(crate) fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

impl Node<()> {
    /// Node with no payload.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, ())
    }
}

impl<T> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Node<T> {}

impl<T> Hash for Node<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// Hash/Eq delegate to the name, so lookups by &str are consistent.
impl<T> Borrow<str> for Node<T> {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
