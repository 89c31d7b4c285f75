//! Shared handle to a defaults specification

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A shared, read-only defaults specification held by every instance.
///
/// It is transparent to comparison: all `DefaultsRef`s are equal, hash to
/// nothing and order as equal, so a record's `PartialEq`, `Eq`, `Hash` and
/// `Ord` derives see field values alone.
pub struct DefaultsRef<D>(Arc<D>);

impl<D> DefaultsRef<D> {
    pub fn new(defaults: D) -> Self {
        Self(Arc::new(defaults))
    }

    pub fn get(&self) -> &D {
        &self.0
    }

    /// Whether both handles point at the same specification.
    pub fn shares(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<D> Clone for DefaultsRef<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> fmt::Debug for DefaultsRef<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultsRef(..)")
    }
}

impl<D> PartialEq for DefaultsRef<D> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<D> Eq for DefaultsRef<D> {}

impl<D> PartialOrd for DefaultsRef<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D> Ord for DefaultsRef<D> {
    fn cmp(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}

impl<D> Hash for DefaultsRef<D> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}
