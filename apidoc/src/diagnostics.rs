//! @ai:module:intent Explicit error/warning sinks handed to each input source
//! @ai:module:layer infrastructure
//! @ai:module:public_api DiagnosticSink, Diagnostics, TracingSink, MemorySink, Severity
//! @ai:module:thread_safe true

use std::fmt;
use std::sync::{Arc, Mutex};

/// @ai:intent Severity a sink reports at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// @ai:intent Destination for human-readable diagnostic messages
pub trait DiagnosticSink: Send + Sync {
    /// @ai:intent Record one message
    fn emit(&self, message: &str);
}

/// @ai:intent Sink forwarding to the tracing subscriber
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    severity: Severity,
}

impl TracingSink {
    /// @ai:intent Create a sink for a severity
    /// @ai:effects pure
    pub fn new(severity: Severity) -> Self {
        Self { severity }
    }
}

impl DiagnosticSink for TracingSink {
    /// @ai:effects log
    fn emit(&self, message: &str) {
        match self.severity {
            Severity::Error => tracing::error!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
        }
    }
}

/// @ai:intent Sink keeping every message in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// @ai:intent Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Snapshot of the messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

/// @ai:intent Pair of error and warning sinks bound to an input source
#[derive(Clone)]
pub struct Diagnostics {
    error: Arc<dyn DiagnosticSink>,
    warn: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    /// @ai:intent Bundle two sinks
    pub fn new(error: Arc<dyn DiagnosticSink>, warn: Arc<dyn DiagnosticSink>) -> Self {
        Self { error, warn }
    }

    /// @ai:intent Sinks that log through tracing
    pub fn tracing() -> Self {
        Self::new(
            Arc::new(TracingSink::new(Severity::Error)),
            Arc::new(TracingSink::new(Severity::Warning)),
        )
    }

    /// @ai:intent Report an error
    pub fn error(&self, message: &str) {
        self.error.emit(message);
    }

    /// @ai:intent Report a warning
    pub fn warn(&self, message: &str) {
        self.warn.emit(message);
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}
