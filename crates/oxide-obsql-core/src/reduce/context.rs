//! Per-traversal reduction state.

use crate::cst::RuleKind;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// State shared by every hook of one traversal.
///
/// One context is created per top-level statement, so parallel reduction of
/// independent statements never shares it.
#[derive(Debug, Default)]
pub struct ReduceCtx {
    diagnostics: Diagnostics,
    statements: Vec<RuleKind>,
    parameters: usize,
}

impl ReduceCtx {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a statement scope. Entering an outermost statement restarts
    /// `?` numbering.
    pub fn enter_statement(&mut self, kind: RuleKind) {
        if self.statements.is_empty() {
            self.parameters = 0;
        }
        self.statements.push(kind);
    }

    /// Closes the innermost statement scope.
    pub fn close_scope(&mut self) {
        self.statements.pop();
    }

    /// Returns the innermost open statement kind.
    #[must_use]
    pub fn current_statement(&self) -> Option<RuleKind> {
        self.statements.last().copied()
    }

    /// Returns the zero-based position of the next `?` placeholder.
    pub fn next_parameter(&mut self) -> usize {
        let position = self.parameters;
        self.parameters += 1;
        position
    }

    /// Records a diagnostic.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.record(diagnostic);
    }

    /// Returns the diagnostics recorded so far.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes the context, returning its diagnostics in emission order.
    #[must_use]
    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }
}
