//! record-shape - immutable records with required and defaultable fields
//!
//! Two layers share one model. A field is either *required* (no default,
//! supplied at every construction, never reset) or *defaultable* (backed
//! by a concrete default, omittable, resettable).
//!
//! - [`record!`] partitions fields at compile time. Omitting a required
//!   field, giving an absent value as a default, or resetting a required
//!   field does not compile.
//! - [`dynamic`] applies the same rules at runtime to shapes described by a
//!   [`schema::RecordSchema`], failing fast instead.

pub mod config;
pub mod dynamic;
pub mod factory;
pub mod observability;
pub mod schema;
pub mod shape;

pub use factory::Factory;
pub use schema::{RecordError, RecordResult};
pub use shape::{
    defaultable_fields, field_kind, required_fields, DefaultsRef, FieldKind, FieldSpec, Required,
    Shape, REQUIRED,
};

#[doc(hidden)]
pub use paste;
