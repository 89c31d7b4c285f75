//! Record factory
//!
//! A thin pass-through: the factory owns the defaults specification and
//! hands it to [`Shape::assemble`] for every instance it creates. Required
//! fields are enforced by the input type, so there is no runtime check to
//! make and no failure path.

use std::fmt;

use crate::shape::{DefaultsRef, FieldSpec, Shape};

/// Creates instances of `S` from constructor input.
pub struct Factory<S: Shape> {
    defaults: DefaultsRef<S::Defaults>,
}

impl<S: Shape> Factory<S> {
    /// Builds a factory around a defaults specification.
    pub fn new(defaults: S::Defaults) -> Self {
        Self {
            defaults: DefaultsRef::new(defaults),
        }
    }

    /// Creates an instance.
    ///
    /// Defaultable fields left `None` take the factory's default; required
    /// fields are stored exactly as given.
    pub fn create(&self, input: S::Input) -> S {
        S::assemble(input, self.defaults.clone())
    }

    /// The defaults specification
    pub fn defaults(&self) -> &S::Defaults {
        self.defaults.get()
    }

    /// Record type name
    pub fn name(&self) -> &'static str {
        S::NAME
    }

    /// Declared fields, in declaration order
    pub fn fields(&self) -> &'static [FieldSpec] {
        S::FIELDS
    }
}

impl<S: Shape> Clone for Factory<S> {
    fn clone(&self) -> Self {
        Self {
            defaults: self.defaults.clone(),
        }
    }
}

impl<S: Shape> fmt::Debug for Factory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("name", &S::NAME)
            .field("fields", &S::FIELDS)
            .finish()
    }
}
