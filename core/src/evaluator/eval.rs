//! Core evaluation logic.

use bigdecimal::BigDecimal;

use crate::evaluator::{Environment, EvalError, operators};
use crate::syntax::{Callee, Expr, ExprId, Workspace};

/// Tree-walking evaluator over a linked workspace.
///
/// The workspace is read-only during evaluation; the only state the
/// evaluator owns is the recursion depth counter. Environments are created
/// fresh for each call and dropped when the call returns, so nothing leaks
/// between calls.
pub struct Evaluator<'w> {
    workspace: &'w Workspace,
    max_depth: usize,
    depth: usize,
}

impl<'w> Evaluator<'w> {
    pub fn new(workspace: &'w Workspace, max_depth: usize) -> Self {
        Self {
            workspace,
            max_depth,
            depth: 0,
        }
    }

    /// Evaluate an expression in the given environment.
    pub fn eval(
        &mut self,
        expr: ExprId,
        env: &Environment<'w>,
    ) -> Result<BigDecimal, EvalError> {
        // Checked on every entry so runaway recursion fails as an error
        // instead of exhausting the host stack.
        if self.depth >= self.max_depth {
            return Err(EvalError::RecursionLimit {
                max_depth: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.eval_inner(expr, env);
        self.depth -= 1;

        result
    }

    fn eval_inner(
        &mut self,
        expr: ExprId,
        env: &Environment<'w>,
    ) -> Result<BigDecimal, EvalError> {
        match self.workspace.expr(expr) {
            Expr::Number(value) => Ok(value.clone()),

            Expr::Binary { op, left, right } => {
                let left = self.eval(*left, env)?;
                let right = self.eval(*right, env)?;
                operators::eval_binary(*op, left, right)
            }

            Expr::Call {
                callee: Callee::Parameter(param),
                ..
            } => {
                let name = self.workspace.param(*param).name.as_str();
                env.get(name)
                    .cloned()
                    .ok_or_else(|| EvalError::UnboundVariable {
                        name: name.to_string(),
                    })
            }

            Expr::Call {
                callee: Callee::Definition(def),
                args,
            } => {
                let def = self.workspace.definition(*def);
                if args.len() != def.params.len() {
                    return Err(EvalError::ArityMismatch {
                        name: def.name.clone(),
                        expected: def.params.len(),
                        found: args.len(),
                    });
                }

                // Arguments evaluate in the caller's environment; the callee
                // gets a fresh one holding only its own parameters. A body
                // never sees the caller's locals.
                let mut inner: Environment<'w> = Environment::with_capacity(args.len());
                for (&param, &arg) in def.params.iter().zip(args) {
                    let value = self.eval(arg, env)?;
                    inner.insert(self.workspace.param(param).name.as_str(), value);
                }
                self.eval(def.body, &inner)
            }
        }
    }
}
