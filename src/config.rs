//! Runtime configuration for dynamic record factories
//!
//! The typed layer has no configuration: everything it enforces is
//! decided at compile time.

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::schema::{RecordError, RecordResult};

/// What to do with input keys a schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Fail construction with `RECORD_UNKNOWN_FIELD`
    #[default]
    Reject,
    /// Drop the key and log `UNKNOWN_FIELD_IGNORED`
    Ignore,
}

/// Configuration shared by a dynamic factory and the records it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    /// Handling of undeclared input keys at construction.
    pub unknown_fields: UnknownFieldPolicy,
    /// Whether events are logged at all.
    pub log_events: bool,
    /// Lowest severity that reaches the log.
    pub min_log_severity: Severity,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
            log_events: true,
            min_log_severity: Severity::Warn,
        }
    }
}

impl RecordConfig {
    /// Reject undeclared keys (the default).
    pub fn strict() -> Self {
        Self::default()
    }

    /// Drop undeclared keys with a warning.
    pub fn lenient() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            ..Self::default()
        }
    }

    /// Default policy, no logging.
    pub fn silent() -> Self {
        Self {
            log_events: false,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> RecordResult<Self> {
        serde_json::from_str(json).map_err(|e| RecordError::MalformedConfig {
            reason: e.to_string(),
        })
    }

    /// Whether undeclared input keys are rejected.
    pub fn rejects_unknown_fields(&self) -> bool {
        self.unknown_fields == UnknownFieldPolicy::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_strict() {
        let config = RecordConfig::default();
        assert!(config.rejects_unknown_fields());
        assert!(config.log_events);
        assert_eq!(config.min_log_severity, Severity::Warn);
    }

    #[test]
    fn test_config_lenient() {
        assert!(!RecordConfig::lenient().rejects_unknown_fields());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = RecordConfig::from_json(r#"{"unknown_fields": "ignore"}"#).unwrap();
        assert_eq!(config.unknown_fields, UnknownFieldPolicy::Ignore);
        assert_eq!(config.min_log_severity, Severity::Warn);

        let config = RecordConfig::from_json(r#"{"min_log_severity": "TRACE", "log_events": false}"#)
            .unwrap();
        assert_eq!(config.min_log_severity, Severity::Trace);
        assert!(!config.log_events);
    }

    #[test]
    fn test_config_malformed_json() {
        let err = RecordConfig::from_json(r#"{"unknown_fields": "sometimes"}"#).unwrap_err();
        assert_eq!(err.code(), "RECORD_MALFORMED_CONFIG");
    }
}
