//! Runtime schemas
//!
//! An explicit schema object (field name → type, nullability, presence)
//! standing in for the compile-time partition when a record's shape is
//! only known at runtime.
//!
//! # Design Principles
//!
//! - Presence is a tagged variant: `required` or `{"default": value}`
//! - A default is never null
//! - Nullability applies only to required fields
//! - Schemas are validated before any factory is built from them
//! - No implicit coercion

mod errors;
mod registry;
mod types;
mod validator;

pub use errors::{RecordError, RecordResult};
pub use registry::SchemaRegistry;
pub use types::{FieldDef, FieldType, Presence, RecordSchema};
pub use validator::json_type_name;

pub(crate) use validator::{check_value, normalize_value};
