//! Runtime schema definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed or unsigned integer
//! - bool: Boolean
//! - float: any JSON number
//! - object: any JSON object (opaque, no nested partitioning)
//! - array: homogeneous array with element type
//! - any: any non-null JSON value

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::errors::{RecordError, RecordResult};
use super::validator::{check_value, normalize_value};

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit integer
    Int,
    /// Boolean
    Bool,
    /// Floating point (integers accepted)
    Float,
    /// Any JSON object
    Object,
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
    /// Any non-null value
    Any,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Object => "object",
            FieldType::Array { .. } => "array",
            FieldType::Any => "any",
        }
    }

    /// Shorthand for an array type
    pub fn array_of(element_type: FieldType) -> Self {
        FieldType::Array {
            element_type: Box::new(element_type),
        }
    }
}

/// Whether a field must be supplied or falls back to a default.
///
/// Serialized as `"required"` or `{"default": <value>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// No default; every construction must supply a value
    Required,
    /// Concrete default used when the value is omitted or null
    Default(Value),
}

impl Presence {
    /// Returns true for [`Presence::Required`]
    pub fn is_required(&self) -> bool {
        matches!(self, Presence::Required)
    }

    /// Returns the default value, if any
    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Presence::Required => None,
            Presence::Default(value) => Some(value),
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether null is a legitimate value. Only meaningful for required fields.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    /// Required, or defaulted
    pub presence: Presence,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FieldDef {
    /// A required, non-nullable field
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            nullable: false,
            presence: Presence::Required,
        }
    }

    /// A required field whose value may be null
    pub fn required_nullable(field_type: FieldType) -> Self {
        Self {
            field_type,
            nullable: true,
            presence: Presence::Required,
        }
    }

    /// A defaultable field
    pub fn defaulted(field_type: FieldType, default: impl Into<Value>) -> Self {
        Self {
            field_type,
            nullable: false,
            presence: Presence::Default(default.into()),
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::required(FieldType::String)
    }

    /// Create a required int field
    pub fn required_int() -> Self {
        Self::required(FieldType::Int)
    }

    /// Create a required bool field
    pub fn required_bool() -> Self {
        Self::required(FieldType::Bool)
    }

    /// Create a defaultable string field
    pub fn default_string(default: impl Into<String>) -> Self {
        Self::defaulted(FieldType::String, default.into())
    }

    /// Create a defaultable int field
    pub fn default_int(default: i64) -> Self {
        Self::defaulted(FieldType::Int, default)
    }

    /// Create a defaultable bool field
    pub fn default_bool(default: bool) -> Self {
        Self::defaulted(FieldType::Bool, default)
    }

    /// Returns true if the field has no default
    pub fn is_required(&self) -> bool {
        self.presence.is_required()
    }
}

/// Complete runtime schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Schema name, used as the record type name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions, iterated in name order
    pub fields: BTreeMap<String, FieldDef>,
}

impl RecordSchema {
    /// Create a schema with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field, replacing any previous definition of the same name
    pub fn field(mut self, name: impl Into<String>, def: FieldDef) -> Self {
        self.fields.insert(name.into(), def);
        self
    }

    /// Sets the description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parses a schema from JSON and validates its structure
    pub fn from_json(json: &str) -> RecordResult<Self> {
        let schema: RecordSchema =
            serde_json::from_str(json).map_err(|e| RecordError::MalformedSchema {
                reason: e.to_string(),
            })?;
        schema.validate_structure()?;
        Ok(schema)
    }

    /// Looks up a field definition
    pub fn get(&self, field: &str) -> Option<&FieldDef> {
        self.fields.get(field)
    }

    /// Names of fields with no default
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, def)| def.is_required())
            .map(|(name, _)| name.as_str())
    }

    /// Names of fields backed by a default
    pub fn defaultable_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, def)| !def.is_required())
            .map(|(name, _)| name.as_str())
    }

    /// Rewrites defaults into their canonical stored form.
    pub(crate) fn normalize_defaults(&mut self) {
        for def in self.fields.values_mut() {
            if let Presence::Default(value) = &mut def.presence {
                let current = std::mem::take(value);
                *value = normalize_value(current, &def.field_type);
            }
        }
    }

    /// Validates the schema itself (not a record).
    ///
    /// A default must be present (non-null) and match its field type.
    pub fn validate_structure(&self) -> RecordResult<()> {
        if self.name.trim().is_empty() {
            return Err(RecordError::invalid_schema(&self.name, "schema name is empty"));
        }

        for (field, def) in &self.fields {
            if field.is_empty() {
                return Err(RecordError::invalid_schema(&self.name, "field name is empty"));
            }

            if let Presence::Default(value) = &def.presence {
                if def.nullable {
                    return Err(RecordError::invalid_schema(
                        &self.name,
                        format!("defaultable field '{}' cannot be nullable", field),
                    ));
                }
                if value.is_null() {
                    return Err(RecordError::invalid_schema(
                        &self.name,
                        format!("default for '{}' is null", field),
                    ));
                }
                check_value(&self.name, field, value, &def.field_type)
                    .map_err(|e| RecordError::invalid_schema(&self.name, format!("bad default: {}", e)))?;
            }
        }

        Ok(())
    }
}
