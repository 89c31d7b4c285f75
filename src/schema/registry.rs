//! In-memory schema registry
//!
//! - One factory per schema name
//! - Registered schemas are immutable: re-registering a name fails
//! - Schemas are validated before they are stored

use serde_json::Value;
use std::collections::HashMap;

use crate::config::RecordConfig;
use crate::dynamic::{DynamicFactory, DynamicRecord};
use crate::observability::{log_event, Event};

use super::errors::{RecordError, RecordResult};
use super::types::RecordSchema;

/// Registry of named schemas and the factories built from them.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    config: RecordConfig,
    factories: HashMap<String, DynamicFactory>,
}

impl SchemaRegistry {
    /// Creates an empty registry with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose factories share `config`.
    pub fn with_config(config: RecordConfig) -> Self {
        Self {
            config,
            factories: HashMap::new(),
        }
    }

    /// Registers a schema.
    ///
    /// # Errors
    ///
    /// - `RECORD_INVALID_SCHEMA` if the schema fails structural validation
    /// - `RECORD_SCHEMA_IMMUTABLE` if the name is already registered
    pub fn register(&mut self, schema: RecordSchema) -> RecordResult<()> {
        if self.factories.contains_key(&schema.name) {
            log_event(
                &self.config,
                Event::SchemaRejected,
                &[("schema", schema.name.as_str()), ("reason", "duplicate")],
            );
            return Err(RecordError::SchemaImmutable {
                schema: schema.name,
            });
        }

        let name = schema.name.clone();
        let factory = DynamicFactory::with_config(schema, self.config.clone())?;
        self.factories.insert(name.clone(), factory);

        log_event(&self.config, Event::SchemaRegistered, &[("schema", name.as_str())]);
        Ok(())
    }

    /// Parses and registers a schema from JSON.
    pub fn register_json(&mut self, json: &str) -> RecordResult<()> {
        let schema = RecordSchema::from_json(json)?;
        self.register(schema)
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&RecordSchema> {
        self.factories.get(name).map(DynamicFactory::schema)
    }

    /// Gets the factory for a schema.
    pub fn factory(&self, name: &str) -> RecordResult<&DynamicFactory> {
        self.factories
            .get(name)
            .ok_or_else(|| RecordError::UnknownSchema {
                schema: name.to_string(),
            })
    }

    /// Builds a record of the named schema.
    pub fn create(&self, name: &str, input: &Value) -> RecordResult<DynamicRecord> {
        self.factory(name)?.create(input)
    }

    /// Checks if a schema is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no schema is registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
