//! Diagnostic log sinks.
//!
//! The client reports retryable failures and empty result pages through a
//! [`LogSink`]. The default sink forwards to `tracing`; a negative level
//! silences it entirely.

use parking_lot::RwLock;
use tracing::{error, info, warn};

/// Leveled sink for diagnostic messages.
pub trait LogSink: Send + Sync {
    /// Logs an informational message.
    fn log(&self, message: &str);

    /// Logs a warning.
    fn warn(&self, message: &str);

    /// Logs an error.
    fn error(&self, message: &str);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogSink;

impl LogSink for NoOpLogSink {
    fn log(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// A sink that forwards messages to the tracing framework.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogSink {
    level: i32,
}

impl Default for TracingLogSink {
    fn default() -> Self {
        Self { level: 0 }
    }
}

impl TracingLogSink {
    /// Creates a sink with the given level. Negative levels are silent.
    #[must_use]
    pub fn new(level: i32) -> Self {
        Self { level }
    }

    /// Creates a silent sink.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(-1)
    }

    /// Returns the configured level.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Whether messages are emitted at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.level >= 0
    }
}

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        if self.is_enabled() {
            info!(target: "ddgs", "{}", message);
        }
    }

    fn warn(&self, message: &str) {
        if self.is_enabled() {
            warn!(target: "ddgs", "{}", message);
        }
    }

    fn error(&self, message: &str) {
        if self.is_enabled() {
            error!(target: "ddgs", "{}", message);
        }
    }
}

/// Severity of a collected message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational.
    Log,
    /// Warning.
    Warn,
    /// Error.
    Error,
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingLogSink {
    messages: RwLock<Vec<(LogLevel, String)>>,
}

impl CollectingLogSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected messages.
    #[must_use]
    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        self.messages.read().clone()
    }

    /// Returns the collected warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.messages
            .read()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Returns the number of collected messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Clears all collected messages.
    pub fn clear(&self) {
        self.messages.write().clear();
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.messages.write().push((level, message.to_string()));
    }
}

impl LogSink for CollectingLogSink {
    fn log(&self, message: &str) {
        self.push(LogLevel::Log, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink() {
        let sink = NoOpLogSink;
        sink.log("a");
        sink.warn("b");
        sink.error("c");
        // Should not panic
    }

    #[test]
    fn test_tracing_sink_levels() {
        assert!(TracingLogSink::default().is_enabled());
        assert!(TracingLogSink::new(2).is_enabled());
        assert!(!TracingLogSink::silent().is_enabled());
        assert!(!TracingLogSink::new(-5).is_enabled());

        let sink = TracingLogSink::silent();
        sink.warn("dropped");
        assert_eq!(sink.level(), -1);
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingLogSink::new();
        assert!(sink.is_empty());

        sink.log("first");
        sink.warn("second");
        sink.error("third");

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.warnings(), vec!["second".to_string()]);
        assert_eq!(sink.messages()[2], (LogLevel::Error, "third".to_string()));

        sink.clear();
        assert!(sink.is_empty());
    }
}
