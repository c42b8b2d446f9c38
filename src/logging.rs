//! Logging sinks
//!
//! Components report through a [`LogSink`] chosen when they are built, so
//! the same generator can log through `tracing` in the CLI and into memory
//! in tests.

use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Severity of a sink record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

/// Destination for diagnostic messages
pub trait LogSink {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn critical(&self, message: &str);
}

/// Forwards to `tracing`, tagging each event with a component label
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    component: &'static str,
}

impl TracingSink {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("generator")
    }
}

impl LogSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!(component = self.component, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(component = self.component, "{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!(component = self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(component = self.component, "{}", message);
    }

    fn critical(&self, message: &str) {
        tracing::error!(component = self.component, critical = true, "{}", message);
    }
}

/// Keeps records in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at `level`
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }
}

impl LogSink for CaptureSink {
    fn debug(&self, message: &str) {
        self.record(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }

    fn critical(&self, message: &str) {
        self.record(Level::Critical, message);
    }
}

/// Default filter directive for a configured verbosity
///
/// 0 = warn, 1 = info, anything higher = debug.
pub fn filter_for_level(log_level: u8) -> &'static str {
    match log_level {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global fmt subscriber; `RUST_LOG` takes precedence
pub fn init_tracing(log_level: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_level(log_level)));
    // A subscriber may already be installed by an embedding application
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_sink_shares_buffer() {
        let sink = CaptureSink::new();
        let boxed: Box<dyn LogSink> = Box::new(sink.clone());
        boxed.info("one");
        boxed.critical("two");
        boxed.debug("three");

        assert_eq!(sink.records().len(), 3);
        assert_eq!(sink.messages(Level::Critical), vec!["two".to_string()]);
    }

    #[test]
    fn test_filter_for_level() {
        assert_eq!(filter_for_level(0), "warn");
        assert_eq!(filter_for_level(1), "info");
        assert_eq!(filter_for_level(2), "debug");
        assert_eq!(filter_for_level(9), "debug");
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        let sink = TracingSink::default();
        sink.warning("no subscriber installed");
        sink.critical("still fine");
    }
}
