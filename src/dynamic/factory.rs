//! Schema-driven record factory

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RecordConfig;
use crate::observability::{log_event, Event};
use crate::schema::{
    check_value, json_type_name, normalize_value, Presence, RecordError, RecordResult, RecordSchema,
};

use super::record::DynamicRecord;

/// Builds [`DynamicRecord`]s for one schema.
///
/// Unlike the typed layer, a missing required field is detected at runtime
/// and fails construction. No value is ever fabricated for it.
#[derive(Debug, Clone)]
pub struct DynamicFactory {
    schema: Arc<RecordSchema>,
    config: Arc<RecordConfig>,
}

impl DynamicFactory {
    /// Creates a factory with the default config.
    ///
    /// # Errors
    ///
    /// `RECORD_INVALID_SCHEMA` if the schema fails structural validation.
    pub fn new(schema: RecordSchema) -> RecordResult<Self> {
        Self::with_config(schema, RecordConfig::default())
    }

    /// Creates a factory with an explicit config.
    pub fn with_config(mut schema: RecordSchema, config: RecordConfig) -> RecordResult<Self> {
        if let Err(e) = schema.validate_structure() {
            log_event(
                &config,
                Event::SchemaRejected,
                &[("schema", schema.name.as_str()), ("reason", e.to_string().as_str())],
            );
            return Err(e);
        }

        schema.normalize_defaults();

        let required = schema.required_fields().count().to_string();
        let defaultable = schema.defaultable_fields().count().to_string();
        log_event(
            &config,
            Event::FactoryBuilt,
            &[
                ("schema", schema.name.as_str()),
                ("required", required.as_str()),
                ("defaultable", defaultable.as_str()),
            ],
        );

        Ok(Self {
            schema: Arc::new(schema),
            config: Arc::new(config),
        })
    }

    /// The schema records are built against
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// The config in effect
    pub fn config(&self) -> &RecordConfig {
        &self.config
    }

    /// Builds a record from a JSON object.
    ///
    /// Defaultable fields that are missing or null take their default.
    /// Required fields keep the supplied value exactly, including null when
    /// the field is nullable.
    pub fn create(&self, input: &Value) -> RecordResult<DynamicRecord> {
        self.build(input).map_err(|e| {
            self.log_rejection(&e);
            e
        })
    }

    fn build(&self, input: &Value) -> RecordResult<DynamicRecord> {
        let obj = input.as_object().ok_or_else(|| RecordError::NotAnObject {
            schema: self.schema.name.clone(),
            actual: json_type_name(input).to_string(),
        })?;

        self.screen_unknown_keys(obj)?;

        let mut values = BTreeMap::new();
        for name in self.schema.fields.keys() {
            let value = resolve(&self.schema, name, obj.get(name))?;
            values.insert(name.clone(), value);
        }

        Ok(DynamicRecord::from_parts(
            Arc::clone(&self.schema),
            Arc::clone(&self.config),
            values,
        ))
    }

    fn screen_unknown_keys(&self, obj: &Map<String, Value>) -> RecordResult<()> {
        for key in obj.keys() {
            if self.schema.fields.contains_key(key) {
                continue;
            }
            if self.config.rejects_unknown_fields() {
                return Err(RecordError::unknown_field(&self.schema.name, key));
            }
            log_event(
                &self.config,
                Event::UnknownFieldIgnored,
                &[("schema", self.schema.name.as_str()), ("field", key.as_str())],
            );
        }
        Ok(())
    }

    fn log_rejection(&self, err: &RecordError) {
        log_event(
            &self.config,
            Event::RecordRejected,
            &[
                ("schema", self.schema.name.as_str()),
                ("code", err.code()),
                ("field", err.field().unwrap_or("")),
            ],
        );
    }
}

/// Resolves the stored value of `field` from an optional supplied value.
///
/// `None` means the caller did not supply the field.
pub(crate) fn resolve(
    schema: &RecordSchema,
    field: &str,
    supplied: Option<&Value>,
) -> RecordResult<Value> {
    let def = schema
        .get(field)
        .ok_or_else(|| RecordError::unknown_field(&schema.name, field))?;

    match (&def.presence, supplied) {
        (Presence::Required, None) => Err(RecordError::missing_required(&schema.name, field)),
        (Presence::Required, Some(Value::Null)) => {
            if def.nullable {
                Ok(Value::Null)
            } else {
                Err(RecordError::null_value(&schema.name, field))
            }
        }
        (Presence::Default(default), None | Some(Value::Null)) => Ok(default.clone()),
        (_, Some(value)) => {
            check_value(&schema.name, field, value, &def.field_type)?;
            Ok(normalize_value(value.clone(), &def.field_type))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{capture_events, Severity};
    use crate::schema::{FieldDef, FieldType};
    use serde_json::json;

    fn sample_factory(config: RecordConfig) -> DynamicFactory {
        let schema = RecordSchema::new("sample")
            .field("a", FieldDef::required_int())
            .field("b", FieldDef::default_int(45))
            .field("c", FieldDef::default_int(17))
            .field("d", FieldDef::required_nullable(FieldType::Int));
        DynamicFactory::with_config(schema, config).unwrap()
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let schema = RecordSchema::new("bad").field("x", FieldDef::defaulted(FieldType::Int, Value::Null));
        let err = DynamicFactory::with_config(schema, RecordConfig::silent()).unwrap_err();
        assert_eq!(err.code(), "RECORD_INVALID_SCHEMA");
    }

    #[test]
    fn test_defaults_fill_omitted_fields() {
        let factory = sample_factory(RecordConfig::silent());
        let record = factory.create(&json!({ "a": 1, "d": 2 })).unwrap();

        assert_eq!(record.get("a").unwrap(), &json!(1));
        assert_eq!(record.get("b").unwrap(), &json!(45));
        assert_eq!(record.get("c").unwrap(), &json!(17));
        assert_eq!(record.get("d").unwrap(), &json!(2));
    }

    #[test]
    fn test_missing_required_fails_fast() {
        let factory = sample_factory(RecordConfig::silent());
        let err = factory.create(&json!({ "a": 1 })).unwrap_err();
        assert_eq!(err.code(), "RECORD_MISSING_REQUIRED");
        assert_eq!(err.field(), Some("d"));
    }

    #[test]
    fn test_required_nullable_keeps_null() {
        let factory = sample_factory(RecordConfig::silent());
        let record = factory.create(&json!({ "a": 1, "d": null })).unwrap();
        assert_eq!(record.get("d").unwrap(), &Value::Null);
    }

    #[test]
    fn test_required_non_nullable_rejects_null() {
        let factory = sample_factory(RecordConfig::silent());
        let err = factory.create(&json!({ "a": null, "d": 2 })).unwrap_err();
        assert_eq!(err.code(), "RECORD_NULL_VALUE");
    }

    #[test]
    fn test_unknown_key_policy() {
        let input = json!({ "a": 1, "d": 2, "extra": true });

        let strict = sample_factory(RecordConfig::silent());
        let err = strict.create(&input).unwrap_err();
        assert_eq!(err.code(), "RECORD_UNKNOWN_FIELD");
        assert_eq!(err.field(), Some("extra"));

        let lenient = sample_factory(RecordConfig::lenient());
        let mut created = None;
        let output = capture_events(|| created = Some(lenient.create(&input)));
        let record = created.unwrap().unwrap();
        assert!(record.get("extra").is_err());

        let parsed: Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(parsed["event"], "UNKNOWN_FIELD_IGNORED");
        assert_eq!(parsed["severity"], "WARN");
        assert_eq!(parsed["field"], "extra");
        assert_eq!(parsed["schema"], "sample");
    }

    #[test]
    fn test_rejection_logged_at_trace() {
        let verbose = RecordConfig {
            min_log_severity: Severity::Trace,
            ..RecordConfig::strict()
        };
        let output = capture_events(|| {
            let factory = sample_factory(verbose.clone());
            assert!(factory.create(&json!({ "a": 1 })).is_err());
        });

        let events: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "FACTORY_BUILT");
        assert_eq!(events[1]["event"], "RECORD_REJECTED");
        assert_eq!(events[1]["code"], "RECORD_MISSING_REQUIRED");
        assert_eq!(events[1]["field"], "d");
    }

    #[test]
    fn test_default_threshold_hides_trace_events() {
        let output = capture_events(|| {
            let factory = sample_factory(RecordConfig::strict());
            assert!(factory.create(&json!({ "a": 1 })).is_err());
        });
        assert!(output.is_empty());
    }

    #[test]
    fn test_not_an_object() {
        let factory = sample_factory(RecordConfig::silent());
        let err = factory.create(&json!([1, 2])).unwrap_err();
        assert_eq!(err.code(), "RECORD_NOT_AN_OBJECT");
    }

    #[test]
    fn test_type_mismatch_on_defaultable() {
        let factory = sample_factory(RecordConfig::silent());
        let err = factory.create(&json!({ "a": 1, "d": 2, "b": "six" })).unwrap_err();
        assert_eq!(err.code(), "RECORD_TYPE_MISMATCH");
        assert_eq!(err.field(), Some("b"));
    }
}
