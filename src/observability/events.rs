//! Observable events
//!
//! Only the runtime schema layer emits events; typed records never log.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A dynamic factory was built from a validated schema
    FactoryBuilt,
    /// A schema was added to a registry
    SchemaRegistered,
    /// A schema failed structural validation or was a duplicate
    SchemaRejected,
    /// Construction or update input was rejected
    RecordRejected,
    /// An undeclared input field was dropped under the lenient policy
    UnknownFieldIgnored,
}

impl Event {
    /// Returns the stable event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FactoryBuilt => "FACTORY_BUILT",
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::UnknownFieldIgnored => "UNKNOWN_FIELD_IGNORED",
        }
    }

    /// Returns the severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::FactoryBuilt | Event::RecordRejected => Severity::Trace,
            Event::SchemaRegistered => Severity::Info,
            Event::SchemaRejected | Event::UnknownFieldIgnored => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
