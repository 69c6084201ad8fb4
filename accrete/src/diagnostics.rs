//! Diagnostics reported while synthesising members.
//!
//! The sink is append-only: reporting never fails and never aborts the
//! caller. The driver decides what an error means for the element it is
//! processing; the sink only records it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity attached to a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational detail, such as a verbose failure trace.
    Note,
    /// Something suspicious that did not prevent synthesis.
    Warning,
    /// A failure scoped to the target element.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A single report scoped to one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the report is.
    pub severity: Severity,
    /// Qualified name of the element the report concerns.
    pub target: String,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    #[must_use]
    pub fn new(severity: Severity, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            target: target.into(),
            message: message.into(),
        }
    }

    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, target, message)
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, target, message)
    }

    /// Creates a note diagnostic.
    #[must_use]
    pub fn note(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, target, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.target, self.message)
    }
}

/// Destination for diagnostics; the host's message-reporting facility.
pub trait DiagnosticSink {
    /// Records `diagnostic`. Implementations must not panic or block.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory, preserving report order.
///
/// # Examples
///
/// ```
/// use accrete::diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Severity};
///
/// let mut sink = Diagnostics::default();
/// sink.report(Diagnostic::error("com.example.Person", "boom"));
/// sink.report(Diagnostic::note("com.example.Person", "detail"));
/// assert_eq!(sink.count(Severity::Error), 1);
/// assert!(sink.has_errors());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All diagnostics in report order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of diagnostics with `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any error diagnostic was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics scoped to `target`.
    pub fn for_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.target == target)
    }

    /// Moves every collected diagnostic into `sink`.
    pub fn drain_into(&mut self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in self.entries.drain(..) {
            sink.report(diagnostic);
        }
    }

    /// Consumes the collector and returns the diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` events.
///
/// Errors are logged at `error`, warnings at `warn`, and notes at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            target,
            message,
        } = diagnostic;
        match severity {
            Severity::Error => tracing::error!(element = %target, "{message}"),
            Severity::Warning => tracing::warn!(element = %target, "{message}"),
            Severity::Note => tracing::info!(element = %target, "{message}"),
        }
    }
}
