//! Diagnostics collected while reducing a concrete tree.
//!
//! Reduction never stops at the first problem: every recoverable anomaly is
//! recorded in a [`Diagnostics`] collector and the walk continues with a
//! best-effort node. Diagnostics are kept in emission order, which is
//! document order.

use serde::{Deserialize, Serialize};

use crate::cst::RuleKind;
use crate::lexer::Span;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A rule's children do not have the shape its reduction expects.
    StructuralMismatch,
    /// A clause the dialect requires is absent.
    MissingClause,
    /// A repeated option changed value; the last occurrence was kept.
    AmbiguousOption,
    /// The tree carries a rule kind the reduction table does not know.
    UnknownRuleKind,
}

impl DiagnosticKind {
    /// Returns the severity a diagnostic of this kind gets by default.
    #[must_use]
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::AmbiguousOption => Severity::Warning,
            Self::StructuralMismatch | Self::MissingClause => Severity::Error,
            Self::UnknownRuleKind => Severity::Fatal,
        }
    }

    /// Returns the name used in rendered diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StructuralMismatch => "StructuralMismatch",
            Self::MissingClause => "MissingClause",
            Self::AmbiguousOption => "AmbiguousOption",
            Self::UnknownRuleKind => "UnknownRuleKind",
        }
    }
}

impl core::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        })
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// How bad it is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Source location of the offending construct.
    pub span: Span,
    /// The rule being reduced, when known.
    pub rule: Option<RuleKind>,
}

impl Diagnostic {
    /// Creates a diagnostic with the default severity of `kind`.
    #[must_use]
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            span,
            rule: None,
        }
    }

    /// Attaches the originating rule.
    #[must_use]
    pub const fn with_rule(mut self, rule: RuleKind) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Overrides the severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns true for error and fatal diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}[{}] {} at {}",
            self.severity, self.kind, self.message, self.span
        )?;
        if let Some(rule) = self.rule {
            write!(f, " ({rule})")?;
        }
        Ok(())
    }
}

/// An ordered diagnostics collector scoped to one traversal.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "diagnostic recorded");
        self.entries.push(diagnostic);
    }

    /// Returns the collected diagnostics and clears the collector.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        core::mem::take(&mut self.entries)
    }

    /// Returns the number of collected diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the diagnostics in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns true if any error or fatal diagnostic was collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_severity() {
        assert_eq!(
            DiagnosticKind::AmbiguousOption.default_severity(),
            Severity::Warning
        );
        assert_eq!(
            DiagnosticKind::MissingClause.default_severity(),
            Severity::Error
        );
        assert_eq!(
            DiagnosticKind::UnknownRuleKind.default_severity(),
            Severity::Fatal
        );
        assert!(Severity::Fatal > Severity::Error);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::MissingClause,
            "derived table needs an alias",
            Span::new(14, 30),
        )
        .with_rule(RuleKind::TableSubquery);
        assert_eq!(
            diagnostic.to_string(),
            "error[MissingClause] derived table needs an alias at 14..30 (table_subquery)"
        );
    }

    #[test]
    fn test_collector_keeps_order_and_drains() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(Diagnostic::new(
            DiagnosticKind::AmbiguousOption,
            "first",
            Span::new(0, 1),
        ));
        assert!(!diagnostics.has_errors());
        diagnostics.record(Diagnostic::new(
            DiagnosticKind::StructuralMismatch,
            "second",
            Span::new(2, 3),
        ));
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 2);

        let drained = diagnostics.drain();
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].message, "second");
        assert!(diagnostics.is_empty());
    }
}
