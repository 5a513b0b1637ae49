//! Rendering linked expressions back to surface syntax.
//!
//! Used for the `- <expr>: <value>` output lines. Parentheses are inserted
//! only where precedence or left-associativity requires them, so rendering
//! then re-parsing yields the same tree.

use core::fmt;

use crate::syntax::{BinOp, Callee, Expr, ExprId, Workspace};

/// Render an expression to canonical source text.
pub fn render(workspace: &Workspace, expr: ExprId) -> String {
    DisplayExpr { workspace, expr }.to_string()
}

/// `Display` adapter over an expression in a workspace.
pub struct DisplayExpr<'w> {
    pub workspace: &'w Workspace,
    pub expr: ExprId,
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.workspace, self.expr, 0, false)
    }
}

fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
    }
}

fn write_expr(
    f: &mut fmt::Formatter<'_>,
    ws: &Workspace,
    expr: ExprId,
    parent: u8,
    right_operand: bool,
) -> fmt::Result {
    match ws.expr(expr) {
        Expr::Number(value) => write!(f, "{}", value),

        Expr::Call { callee, args } => {
            let name = match callee {
                Callee::Parameter(param) => &ws.param(*param).name,
                Callee::Definition(def) => &ws.definition(*def).name,
            };
            write!(f, "{}", name)?;
            if !args.is_empty() {
                write!(f, "(")?;
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_expr(f, ws, arg, 0, false)?;
                }
                write!(f, ")")?;
            }
            Ok(())
        }

        Expr::Binary { op, left, right } => {
            let prec = precedence(*op);
            // A right operand at equal precedence needs parentheses to
            // survive left-associative re-parsing: 1 - (2 - 3).
            let parens = prec < parent || (right_operand && prec == parent);
            if parens {
                write!(f, "(")?;
            }
            write_expr(f, ws, *left, prec, false)?;
            write!(f, " {} ", op)?;
            write_expr(f, ws, *right, prec, true)?;
            if parens {
                write!(f, ")")?;
            }
            Ok(())
        }
    }
}
