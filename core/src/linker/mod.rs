//! Lowering of parse trees into a linked [`Workspace`].
//!
//! Linking runs in two phases so definitions can reference each other
//! regardless of declaration order, including across modules:
//!
//! 1. every module is registered (definition headers, parameter lists,
//!    declared imports resolved by module name), then
//! 2. definition bodies and evaluation statements are lowered, resolving
//!    each call name to a [`Callee`].
//!
//! For ad-hoc expression input, [`merge_context`] runs between the phases so
//! sibling modules are in scope without explicit import clauses.
//!
//! Scope order for a name inside a definition body: the enclosing
//! definition's parameters, then the module's own definitions, then imported
//! modules' definitions in import order. The first match wins; parameters
//! shadow definitions.

mod merge;

#[cfg(test)]
mod link_test;

pub use merge::merge_context;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::diagnostics::{Diagnostic, Severity};
use crate::parser::{ParsedExpr, ParsedModule, ParsedStatement};
use crate::syntax::{
    Callee, DefId, Expr, ExprId, Import, ModuleId, ParamId, Statement, Workspace,
};

/// How the input module entered the workspace: a file keeps its own declared
/// imports, an ad-hoc expression sees every loaded module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    File,
    Expression,
}

/// A fully linked workspace plus the module whose evaluations are to run.
#[derive(Debug)]
pub struct Program {
    pub workspace: Workspace,
    pub target: ModuleId,
}

#[derive(Debug, Error)]
#[error("linking failed with {} error(s)", .diagnostics.len())]
pub struct LinkError {
    pub diagnostics: Vec<Diagnostic>,
}

/// Link `modules` (in load order; the last entry is the target) into a
/// [`Program`]. Fails if any name cannot be resolved.
pub fn link(modules: &[&ParsedModule], mode: InputMode) -> Result<Program, LinkError> {
    assert!(!modules.is_empty(), "link requires at least one module");

    let mut ws = Workspace::new();
    let mut diagnostics = Vec::new();

    // Phase 1: register modules and definition headers.
    let mut module_ids = Vec::with_capacity(modules.len());
    let mut defs_by_module: Vec<Vec<DefId>> = Vec::with_capacity(modules.len());
    for parsed in modules {
        let module = ws.alloc_module(parsed.name.clone());
        let mut defs = Vec::new();
        for statement in &parsed.statements {
            if let ParsedStatement::Definition(def) = statement {
                let id = ws.alloc_definition(def.name.clone());
                let params: SmallVec<[ParamId; 4]> = def
                    .params
                    .iter()
                    .map(|p| ws.alloc_parameter(p.name.clone(), id))
                    .collect();
                ws.set_def_params(id, params);
                defs.push(id);
            }
        }
        module_ids.push(module);
        defs_by_module.push(defs);
    }

    // Declared imports resolve against the loaded set by module name.
    for (index, parsed) in modules.iter().enumerate() {
        for import in &parsed.imports {
            match modules.iter().position(|m| m.name == import.module) {
                Some(found) => ws.add_import(
                    module_ids[index],
                    Import {
                        module: module_ids[found],
                    },
                ),
                None => diagnostics.push(
                    Diagnostic::error(
                        "L002",
                        &parsed.name,
                        format!("imported module '{}' is not loaded", import.module),
                    )
                    .with_span(import.span.clone()),
                ),
            }
        }
    }

    let target = module_ids[module_ids.len() - 1];
    if mode == InputMode::Expression {
        merge_context(&mut ws, target);
    }

    // Phase 2: lower statement bodies, resolving call names.
    for (index, parsed) in modules.iter().enumerate() {
        let module = module_ids[index];
        let mut next_def = 0;
        for statement in &parsed.statements {
            match statement {
                ParsedStatement::Definition(def) => {
                    let id = defs_by_module[index][next_def];
                    next_def += 1;
                    let params = ws.definition(id).params.clone();
                    if let Some(body) = lower_expr(
                        &mut ws,
                        &defs_by_module,
                        module,
                        &params,
                        &def.body,
                        &parsed.name,
                        &mut diagnostics,
                    ) {
                        ws.set_def_body(id, body);
                    }
                    ws.push_statement(module, Statement::Definition(id));
                }
                ParsedStatement::Evaluation(expr) => {
                    if let Some(id) = lower_expr(
                        &mut ws,
                        &defs_by_module,
                        module,
                        &[],
                        expr,
                        &parsed.name,
                        &mut diagnostics,
                    ) {
                        ws.push_statement(module, Statement::Evaluation(id));
                    }
                }
            }
        }
    }

    if diagnostics.iter().any(|d| d.severity == Severity::Error) {
        return Err(LinkError { diagnostics });
    }
    debug!(modules = modules.len(), "linked workspace");
    Ok(Program {
        workspace: ws,
        target,
    })
}

fn lower_expr(
    ws: &mut Workspace,
    defs_by_module: &[Vec<DefId>],
    module: ModuleId,
    params: &[ParamId],
    parsed: &ParsedExpr,
    module_name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ExprId> {
    match parsed {
        ParsedExpr::Number(value) => Some(ws.alloc_expr(Expr::Number(value.clone()))),
        ParsedExpr::Binary { op, left, right } => {
            let left = lower_expr(ws, defs_by_module, module, params, left, module_name, diagnostics);
            let right =
                lower_expr(ws, defs_by_module, module, params, right, module_name, diagnostics);
            match (left, right) {
                (Some(left), Some(right)) => Some(ws.alloc_expr(Expr::Binary {
                    op: *op,
                    left,
                    right,
                })),
                _ => None,
            }
        }
        ParsedExpr::Call { name, span, args } => {
            let callee = resolve(ws, defs_by_module, module, params, name);
            if callee.is_none() {
                diagnostics.push(
                    Diagnostic::error(
                        "L001",
                        module_name,
                        format!("'{}' does not resolve to a definition or parameter", name),
                    )
                    .with_span(span.clone()),
                );
            }
            // Lower arguments even under an unresolved callee so one bad
            // name does not hide diagnostics in the arguments.
            let mut lowered: SmallVec<[ExprId; 4]> = SmallVec::new();
            let mut args_ok = true;
            for arg in args {
                match lower_expr(ws, defs_by_module, module, params, arg, module_name, diagnostics)
                {
                    Some(arg) => lowered.push(arg),
                    None => args_ok = false,
                }
            }
            let callee = callee?;
            args_ok.then(|| {
                ws.alloc_expr(Expr::Call {
                    callee,
                    args: lowered,
                })
            })
        }
    }
}

/// Resolve a call name: parameters, then own definitions, then imports in
/// order. First match wins.
fn resolve(
    ws: &Workspace,
    defs_by_module: &[Vec<DefId>],
    module: ModuleId,
    params: &[ParamId],
    name: &str,
) -> Option<Callee> {
    if let Some(&param) = params.iter().find(|&&p| ws.param(p).name == name) {
        return Some(Callee::Parameter(param));
    }
    if let Some(def) = find_definition(ws, &defs_by_module[module.index()], name) {
        return Some(Callee::Definition(def));
    }
    for import in &ws.module(module).imports {
        if let Some(def) = find_definition(ws, &defs_by_module[import.module.index()], name) {
            return Some(Callee::Definition(def));
        }
    }
    None
}

fn find_definition(ws: &Workspace, defs: &[DefId], name: &str) -> Option<DefId> {
    defs.iter().copied().find(|&d| ws.definition(d).name == name)
}
