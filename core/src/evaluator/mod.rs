//! Tree-walking evaluation of linked expressions to exact decimal values.
//!
//! The evaluator is purely functional over the immutable workspace: it
//! performs no name resolution (calls are already resolved to their callee)
//! and no validation beyond the failures it reports. Addition, subtraction
//! and multiplication are exact; division rounds half-up at
//! [`DIV_SCALE`] fractional digits. Every failure aborts the whole
//! evaluation with an [`EvalError`], never a partial result.
//!
//! ## Example
//!
//! ```ignore
//! let parsed = parser::parse_adhoc("def f(x): x + 1; f(5)")?;
//! let program = linker::link(&[&parsed], InputMode::Expression)?;
//! let expr = /* first Evaluation statement of program.target */;
//! let six = evaluator::evaluate(&program.workspace, expr)?;
//! ```

mod error;
mod eval;
mod operators;


pub use error::EvalError;
pub use eval::Evaluator;
pub use operators::DIV_SCALE;

use bigdecimal::BigDecimal;

use crate::syntax::{ExprId, Workspace};

/// Per-call binding of parameter names to decimal values. Created fresh for
/// each call, owned by that call, dropped on return.
pub type Environment<'w> = hashbrown::HashMap<&'w str, BigDecimal>;

/// Depth limit used by [`evaluate`]; deep enough for any reasonable model,
/// small enough to fail long before the host stack does.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Evaluate an expression with an empty environment. Top-level evaluation
/// statements reference no free parameters, so this is the usual entry.
pub fn evaluate(workspace: &Workspace, expr: ExprId) -> Result<BigDecimal, EvalError> {
    evaluate_with_limits(workspace, expr, DEFAULT_MAX_DEPTH)
}

/// Evaluate an expression in an explicit environment.
pub fn evaluate_in<'w>(
    workspace: &'w Workspace,
    expr: ExprId,
    env: &Environment<'w>,
) -> Result<BigDecimal, EvalError> {
    Evaluator::new(workspace, DEFAULT_MAX_DEPTH).eval(expr, env)
}

/// Evaluate with a custom recursion depth limit.
pub fn evaluate_with_limits(
    workspace: &Workspace,
    expr: ExprId,
    max_depth: usize,
) -> Result<BigDecimal, EvalError> {
    Evaluator::new(workspace, max_depth).eval(expr, &Environment::new())
}
