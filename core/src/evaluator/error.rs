//! Failures surfaced by expression evaluation.
//!
//! None of these are recovered locally: any failure aborts evaluation of the
//! entire containing statement and propagates to the caller. The embedding
//! layer decides whether to continue with other statements.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    /// The right operand of a division evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A call supplied a different number of arguments than the definition
    /// declares.
    #[error("'{name}' expects {expected} argument(s), but {found} were supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A parameter reference had no binding in the current environment.
    ///
    /// The linker only resolves parameter references inside their owning
    /// definition, so this indicates a broken invariant upstream rather than
    /// a user mistake.
    #[error("parameter '{name}' is not bound in the current environment")]
    UnboundVariable { name: String },

    /// The evaluation depth limit was reached before the expression
    /// finished; recursive definitions that never terminate end up here.
    #[error("recursion limit of {max_depth} exceeded")]
    RecursionLimit { max_depth: usize },
}
