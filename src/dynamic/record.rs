//! Immutable schema-driven record

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RecordConfig;
use crate::observability::{log_event, Event};
use crate::schema::{json_type_name, Presence, RecordError, RecordResult, RecordSchema};

use super::factory::resolve;

/// An immutable record produced by a [`DynamicFactory`](super::DynamicFactory).
///
/// Every operation that changes a value returns a new record; `self` is
/// never altered. Records compare equal when their schemas are equal and
/// they hold equal values.
#[derive(Debug, Clone)]
pub struct DynamicRecord {
    schema: Arc<RecordSchema>,
    config: Arc<RecordConfig>,
    values: Arc<BTreeMap<String, Value>>,
}

impl DynamicRecord {
    pub(crate) fn from_parts(
        schema: Arc<RecordSchema>,
        config: Arc<RecordConfig>,
        values: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            schema,
            config,
            values: Arc::new(values),
        }
    }

    /// The schema this record conforms to
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Reads a field.
    ///
    /// Defaultable fields are always present. A nullable required field
    /// may read as `Value::Null`.
    pub fn get(&self, field: &str) -> RecordResult<&Value> {
        let value = self
            .values
            .get(field)
            .ok_or_else(|| RecordError::unknown_field(&self.schema.name, field));
        self.checked(value)
    }

    /// Returns a new record with `field` set to `value`.
    ///
    /// Legal for every declared field. Null on a defaultable field reverts
    /// it to its default, the same as at construction.
    pub fn set(&self, field: &str, value: impl Into<Value>) -> RecordResult<Self> {
        let value = value.into();
        let resolved = self.checked(resolve(&self.schema, field, Some(&value)))?;
        Ok(self.replace([(field.to_string(), resolved)]))
    }

    /// Returns a new record with `field` replaced by `f(current)`.
    pub fn update<F>(&self, field: &str, f: F) -> RecordResult<Self>
    where
        F: FnOnce(&Value) -> Value,
    {
        let next = f(self.get(field)?);
        self.set(field, next)
    }

    /// Returns a new record with a defaultable `field` reset to its default.
    ///
    /// # Errors
    ///
    /// `RECORD_REQUIRED_FIELD_DELETE` for a required field: there is no
    /// value it could fall back to.
    pub fn delete(&self, field: &str) -> RecordResult<Self> {
        let def = self
            .schema
            .get(field)
            .ok_or_else(|| RecordError::unknown_field(&self.schema.name, field));
        let def = self.checked(def)?;

        match &def.presence {
            Presence::Required => self.checked(Err(RecordError::required_field_delete(
                &self.schema.name,
                field,
            ))),
            Presence::Default(default) => Ok(self.replace([(field.to_string(), default.clone())])),
        }
    }

    /// Returns a new record with every key of `patch` set.
    ///
    /// All or nothing: if any key is rejected, no record is produced.
    pub fn merge(&self, patch: &Value) -> RecordResult<Self> {
        let obj = patch.as_object().ok_or_else(|| RecordError::NotAnObject {
            schema: self.schema.name.clone(),
            actual: json_type_name(patch).to_string(),
        });
        let obj = self.checked(obj)?;

        let mut updates = Vec::with_capacity(obj.len());
        for (field, value) in obj {
            let resolved = self.checked(resolve(&self.schema, field, Some(value)))?;
            updates.push((field.clone(), resolved));
        }
        Ok(self.replace(updates))
    }

    /// Whether a field currently holds its default value.
    ///
    /// Always false for required fields.
    pub fn is_default(&self, field: &str) -> RecordResult<bool> {
        let current = self.get(field)?;
        Ok(self
            .schema
            .get(field)
            .and_then(|def| def.presence.default_value())
            .map_or(false, |default| default == current))
    }

    /// Iterates fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts to a JSON object
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Value::Object(map)
    }

    fn replace(&self, updates: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut values = (*self.values).clone();
        for (field, value) in updates {
            values.insert(field, value);
        }
        Self {
            schema: Arc::clone(&self.schema),
            config: Arc::clone(&self.config),
            values: Arc::new(values),
        }
    }

    fn checked<T>(&self, result: RecordResult<T>) -> RecordResult<T> {
        if let Err(e) = &result {
            log_event(
                &self.config,
                Event::RecordRejected,
                &[
                    ("schema", self.schema.name.as_str()),
                    ("code", e.code()),
                    ("field", e.field().unwrap_or("")),
                ],
            );
        }
        result
    }
}

impl PartialEq for DynamicRecord {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.schema, &other.schema) || *self.schema == *other.schema)
            && self.values == other.values
    }
}

impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
