//! Runtime-checked records
//!
//! The runtime counterpart of the `record!` macro for shapes that are only
//! known at runtime. The required/defaultable partition comes from a
//! [`RecordSchema`](crate::schema::RecordSchema) instead of the type
//! system, and every contract the macro enforces at compile time is checked
//! here on each call:
//!
//! - construction fails fast on a missing required field
//! - only declared fields can be read or written
//! - only defaultable fields can be deleted (reset to default)

mod factory;
mod record;

pub use factory::DynamicFactory;
pub use record::DynamicRecord;
