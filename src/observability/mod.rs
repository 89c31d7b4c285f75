//! Observability for the runtime schema layer
//!
//! - Structured logging (JSON lines on stdout)
//! - Typed events with fixed severities
//! - Threshold filtering driven by [`RecordConfig`](crate::config::RecordConfig)
//!
//! # Usage
//!
//! ```
//! use record_shape::config::RecordConfig;
//! use record_shape::observability::{log_event, Event};
//!
//! log_event(&RecordConfig::default(), Event::SchemaRegistered, &[("schema", "user")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::Severity;

use logger::Logger;
use std::io::{self, Write};

use crate::config::RecordConfig;

#[cfg(test)]
thread_local! {
    static CAPTURE: std::cell::RefCell<Option<Vec<u8>>> = std::cell::RefCell::new(None);
}

/// Log an event to stdout if the config lets its severity through.
pub fn log_event(config: &RecordConfig, event: Event, fields: &[(&str, &str)]) {
    #[cfg(test)]
    {
        let captured = CAPTURE.with(|slot| match slot.borrow_mut().as_mut() {
            Some(buffer) => {
                log_event_to(config, event, fields, buffer);
                true
            }
            None => false,
        });
        if captured {
            return;
        }
    }
    log_event_to(config, event, fields, &mut io::stdout());
}

/// Whether `config` lets `event` reach the log.
pub fn is_logged(config: &RecordConfig, event: Event) -> bool {
    config.log_events && event.severity() >= config.min_log_severity
}

pub(crate) fn log_event_to<W: Write>(
    config: &RecordConfig,
    event: Event,
    fields: &[(&str, &str)],
    writer: &mut W,
) {
    if is_logged(config, event) {
        Logger::log_to_writer(event.severity(), event.as_str(), fields, writer);
    }
}

/// Runs `f` and returns every line `log_event` emitted on this thread meanwhile.
#[cfg(test)]
pub(crate) fn capture_events<F: FnOnce()>(f: F) -> String {
    CAPTURE.with(|slot| *slot.borrow_mut() = Some(Vec::new()));
    f();
    let buffer = CAPTURE.with(|slot| slot.borrow_mut().take()).unwrap_or_default();
    String::from_utf8(buffer).unwrap()
}
