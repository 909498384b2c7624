//! Concrete parse tree model.
//!
//! A concrete tree mirrors the grammar derivation: one [`RuleNode`] per rule
//! application and one [`Terminal`] per token, each carrying its source span.
//! Trees are immutable once built; the reducers only read them.

mod node;
mod rule;

pub use node::{ParseNode, RuleNode, Terminal};
pub use rule::RuleKind;
