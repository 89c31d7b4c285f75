//! Compile-time field partitioning
//!
//! A record shape is declared with [`record!`](crate::record). Each field is
//! either required (`name: Type`) or defaultable (`name?: Type`), and the
//! macro derives three contracts from that partition:
//!
//! - the defaults specification, where required fields accept only
//!   [`REQUIRED`] and defaultable fields accept a concrete `Type`
//! - the constructor input, where required fields are mandatory and
//!   defaultable fields are `Option<Type>`
//! - the instance surface, where defaultable fields always read as `&Type`
//!   and only defaultable fields can be reset
//!
//! Optionality comes from the `?` marker alone. `d: Option<i64>` is a
//! required field whose value may be `None`.

mod defaults;
mod macros;

pub use defaults::DefaultsRef;

/// The sentinel type for "no default, must be supplied".
///
/// Its only value is [`REQUIRED`], and it is the only type a required
/// field's entry in a defaults specification accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Required;

/// Marks a field of a defaults specification as required.
pub const REQUIRED: Required = Required;

/// Which side of the partition a field falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// No default; supplied at every construction, never reset
    Required,
    /// Backed by a default; may be omitted or reset
    Defaultable,
}

/// Name and kind of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    pub fn is_required(&self) -> bool {
        self.kind == FieldKind::Required
    }
}

/// A record type generated by [`record!`](crate::record).
///
/// Implemented by the macro; there is no reason to implement it by hand.
pub trait Shape: Sized {
    /// Constructor input: required fields plus optional overrides
    type Input;
    /// Defaults specification: [`Required`] or a concrete default per field
    type Defaults;

    /// Record type name
    const NAME: &'static str;
    /// Declared fields, in declaration order
    const FIELDS: &'static [FieldSpec];

    /// Builds an instance, filling omitted defaultable fields from `defaults`.
    fn assemble(input: Self::Input, defaults: DefaultsRef<Self::Defaults>) -> Self;
}

/// Names of the required fields of `S`, in declaration order.
pub fn required_fields<S: Shape>() -> impl Iterator<Item = &'static str> {
    S::FIELDS
        .iter()
        .filter(|spec| spec.is_required())
        .map(|spec| spec.name)
}

/// Names of the defaultable fields of `S`, in declaration order.
pub fn defaultable_fields<S: Shape>() -> impl Iterator<Item = &'static str> {
    S::FIELDS
        .iter()
        .filter(|spec| !spec.is_required())
        .map(|spec| spec.name)
}

/// Kind of the named field, or `None` if `S` does not declare it.
pub fn field_kind<S: Shape>(name: &str) -> Option<FieldKind> {
    S::FIELDS
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.kind)
}
