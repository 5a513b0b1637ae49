use core::fmt;

use bigdecimal::BigDecimal;
use smallvec::SmallVec;

use super::{DefId, ExprId, ModuleId, ParamId};

/// A compilation unit: an ordered list of imports and top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub imports: Vec<Import>,
    pub statements: Vec<Statement>,
}

/// A reference from one module to another whose definitions it may call.
///
/// Declared imports come from `import` clauses in the source; synthetic ones
/// are appended by [`merge_context`](crate::linker::merge_context) for ad-hoc
/// expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Import {
    pub module: ModuleId,
}

/// A top-level statement, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Definition(DefId),
    Evaluation(ExprId),
}

/// A named function: formal parameters and a single body expression.
/// A parameterless definition acts as a named constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub params: SmallVec<[ParamId; 4]>,
    pub body: ExprId,
}

/// A formal parameter, owned by exactly one definition. Referenced inside
/// the owning definition's body as a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredParameter {
    pub name: String,
    pub owner: DefId,
}

/// An expression node. One case per grammar production; evaluation is an
/// exhaustive match over this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An exact decimal literal.
    Number(BigDecimal),
    Binary {
        op: BinOp,
        left: ExprId,
        right: ExprId,
    },
    /// A call, or a bare name: `f(x, y)`, `pi`, `x`.
    Call {
        callee: Callee,
        args: SmallVec<[ExprId; 4]>,
    },
}

/// What a call's name resolved to. The linker settles this duality once;
/// the evaluator never inspects names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callee {
    /// A bound variable reference to an enclosing definition's parameter.
    Parameter(ParamId),
    /// An invocation of a definition.
    Definition(DefId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        })
    }
}
