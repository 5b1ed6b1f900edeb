use thiserror::Error;

/// Errors from evaluating a malformed postfix expression.
///
/// Expressions produced by [crate::parse] never cause these.
/// The combinators may already have been called when an error is returned,
/// any cleanup of their side effects is up to the caller.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum EvalError {
    #[error("insufficient operands for operator at position {position}")]
    InsufficientOperands { position: usize },

    #[error("{count} orphaned operands after evaluation")]
    OrphanedOperands { count: usize },
}
