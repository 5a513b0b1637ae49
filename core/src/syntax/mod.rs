//! The linked syntax model.
//!
//! All nodes of a calculation live in one [`Workspace`] arena and refer to
//! each other through compact ids. Ids keep the reference graph acyclic from
//! the borrow checker's point of view even though the language allows
//! mutually recursive definitions.

mod ids;
mod tree;
mod workspace;

#[cfg(test)]
mod workspace_test;

pub use ids::{DefId, ExprId, ModuleId, ParamId};
pub use tree::{
    BinOp, Callee, DeclaredParameter, Definition, Expr, Import, Module, Statement,
};
pub use workspace::Workspace;
