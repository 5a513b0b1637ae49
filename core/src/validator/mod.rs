//! Static checks over a linked program.
//!
//! Runs after linking and before evaluation; any error-severity diagnostic
//! gates evaluation entirely. The evaluator repeats the dynamic subset of
//! these checks (arity, unbound parameters) because the library API allows
//! evaluating without validating first.


use bigdecimal::Zero;

use crate::diagnostics::Diagnostic;
use crate::linker::Program;
use crate::syntax::{BinOp, Callee, Expr, ExprId, ModuleId, Statement, Workspace};

pub fn validate(program: &Program) -> Vec<Diagnostic> {
    let ws = &program.workspace;
    let mut diagnostics = Vec::new();

    for module in ws.modules() {
        check_duplicate_definitions(ws, module, &mut diagnostics);
        check_duplicate_parameters(ws, module, &mut diagnostics);
        check_import_collisions(ws, module, &mut diagnostics);

        let module_name = ws.module(module).name.clone();
        for statement in &ws.module(module).statements {
            let root = match statement {
                Statement::Definition(def) => ws.definition(*def).body,
                Statement::Evaluation(expr) => *expr,
            };
            check_expr(ws, &module_name, root, &mut diagnostics);
        }
    }

    diagnostics
}

fn check_duplicate_definitions(
    ws: &Workspace,
    module: ModuleId,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let defs: Vec<_> = ws.definitions(module).collect();
    for (i, &def) in defs.iter().enumerate() {
        let name = &ws.definition(def).name;
        if defs[..i].iter().any(|&d| ws.definition(d).name == *name) {
            diagnostics.push(Diagnostic::error(
                "V001",
                &ws.module(module).name,
                format!("'{}' is defined more than once", name),
            ));
        }
    }
}

fn check_duplicate_parameters(
    ws: &Workspace,
    module: ModuleId,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for def in ws.definitions(module) {
        let def = ws.definition(def);
        for (i, &param) in def.params.iter().enumerate() {
            let name = &ws.param(param).name;
            if def.params[..i].iter().any(|&p| ws.param(p).name == *name) {
                diagnostics.push(Diagnostic::error(
                    "V002",
                    &ws.module(module).name,
                    format!("'{}' declares parameter '{}' more than once", def.name, name),
                ));
            }
        }
    }
}

/// Definitions reachable through imports that share a name resolve to the
/// first-loaded one; surface the shadowing so the pick is visible.
fn check_import_collisions(ws: &Workspace, module: ModuleId, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen: Vec<(&str, ModuleId)> = ws
        .definitions(module)
        .map(|d| (ws.definition(d).name.as_str(), module))
        .collect();

    for import in &ws.module(module).imports {
        for def in ws.definitions(import.module) {
            let name = ws.definition(def).name.as_str();
            let winner = seen.iter().find(|(n, _)| *n == name).map(|&(_, w)| w);
            match winner {
                Some(winner) if winner != import.module => {
                    diagnostics.push(Diagnostic::warning(
                        "V101",
                        &ws.module(module).name,
                        format!(
                            "'{}' from module '{}' is shadowed by the declaration in '{}'",
                            name,
                            ws.module(import.module).name,
                            ws.module(winner).name,
                        ),
                    ));
                }
                Some(_) => {}
                None => seen.push((name, import.module)),
            }
        }
    }
}

fn check_expr(ws: &Workspace, module_name: &str, expr: ExprId, diagnostics: &mut Vec<Diagnostic>) {
    match ws.expr(expr) {
        Expr::Number(_) => {}
        Expr::Binary { op, left, right } => {
            check_expr(ws, module_name, *left, diagnostics);
            check_expr(ws, module_name, *right, diagnostics);
            if *op == BinOp::Div {
                if let Expr::Number(divisor) = ws.expr(*right) {
                    if divisor.is_zero() {
                        diagnostics.push(Diagnostic::warning(
                            "V102",
                            module_name,
                            "division by the constant zero always fails",
                        ));
                    }
                }
            }
        }
        Expr::Call { callee, args } => {
            for &arg in args {
                check_expr(ws, module_name, arg, diagnostics);
            }
            match callee {
                Callee::Definition(def) => {
                    let def = ws.definition(*def);
                    if args.len() != def.params.len() {
                        diagnostics.push(Diagnostic::error(
                            "V003",
                            module_name,
                            format!(
                                "'{}' expects {} argument(s), but {} were supplied",
                                def.name,
                                def.params.len(),
                                args.len()
                            ),
                        ));
                    }
                }
                Callee::Parameter(param) => {
                    if !args.is_empty() {
                        diagnostics.push(Diagnostic::error(
                            "V004",
                            module_name,
                            format!(
                                "parameter '{}' cannot be called with arguments",
                                ws.param(*param).name
                            ),
                        ));
                    }
                }
            }
        }
    }
}
