//! Unit tests for linking and context merging.

use pretty_assertions::assert_eq;

use super::*;
use crate::parser::{parse_adhoc, parse_module};
use crate::syntax::Statement;

fn link_sources(sources: &[&str], mode: InputMode) -> Result<Program, LinkError> {
    let parsed: Vec<_> = sources
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i + 1 == sources.len() && mode == InputMode::Expression {
                parse_adhoc(s).expect("ad-hoc input parses")
            } else {
                parse_module(s).expect("module parses")
            }
        })
        .collect();
    let refs: Vec<_> = parsed.iter().collect();
    link(&refs, mode)
}

fn first_evaluation(program: &Program) -> crate::syntax::ExprId {
    program
        .workspace
        .module(program.target)
        .statements
        .iter()
        .find_map(|s| match s {
            Statement::Evaluation(e) => Some(*e),
            Statement::Definition(_) => None,
        })
        .expect("target has an evaluation")
}

#[test]
fn resolves_calls_to_own_definitions() {
    let program = link_sources(&["module m def one: 1; one;"], InputMode::File).unwrap();
    let ws = &program.workspace;
    let expr = first_evaluation(&program);
    let Expr::Call {
        callee: Callee::Definition(def),
        args,
    } = ws.expr(expr)
    else {
        panic!("expected a definition call");
    };
    assert_eq!(ws.definition(*def).name, "one");
    assert!(args.is_empty());
}

#[test]
fn definitions_resolve_regardless_of_declaration_order() {
    let program =
        link_sources(&["module m def a: b; def b: 1; a;"], InputMode::File).unwrap();
    let ws = &program.workspace;
    let a = ws.definitions(program.target).next().unwrap();
    let Expr::Call {
        callee: Callee::Definition(b),
        ..
    } = ws.expr(ws.definition(a).body)
    else {
        panic!("expected call in body of 'a'");
    };
    assert_eq!(ws.definition(*b).name, "b");
}

#[test]
fn parameters_shadow_definitions() {
    let program = link_sources(
        &["module m def x: 1; def f(x): x; f(2);"],
        InputMode::File,
    )
    .unwrap();
    let ws = &program.workspace;
    let f = ws
        .definitions(program.target)
        .find(|&d| ws.definition(d).name == "f")
        .unwrap();
    let Expr::Call {
        callee: Callee::Parameter(param),
        ..
    } = ws.expr(ws.definition(f).body)
    else {
        panic!("expected parameter reference in body of 'f'");
    };
    assert_eq!(ws.param(*param).owner, f);
}

#[test]
fn parameters_do_not_leak_into_other_bodies() {
    let err = link_sources(&["module m def f(x): x; x;"], InputMode::File).unwrap_err();
    assert_eq!(err.diagnostics.len(), 1);
    assert_eq!(err.diagnostics[0].code, "L001");
}

#[test]
fn declared_imports_resolve_by_module_name() {
    let program = link_sources(
        &[
            "module lib def pi: 3.14;",
            "module main import lib pi * 2;",
        ],
        InputMode::File,
    )
    .unwrap();
    let ws = &program.workspace;
    let expr = first_evaluation(&program);
    let Expr::Binary { left, .. } = ws.expr(expr) else {
        panic!("expected binary expression");
    };
    let Expr::Call {
        callee: Callee::Definition(def),
        ..
    } = ws.expr(*left)
    else {
        panic!("expected call to imported definition");
    };
    assert_eq!(ws.definition(*def).name, "pi");
}

#[test]
fn file_mode_does_not_see_unimported_modules() {
    let err = link_sources(
        &["module lib def pi: 3.14;", "module main pi;"],
        InputMode::File,
    )
    .unwrap_err();
    assert_eq!(err.diagnostics[0].code, "L001");
}

#[test]
fn unknown_import_is_an_error() {
    let err = link_sources(&["module main import missing 1;"], InputMode::File).unwrap_err();
    assert_eq!(err.diagnostics[0].code, "L002");
    assert!(err.diagnostics[0].message.contains("missing"));
}

#[test]
fn expression_mode_merges_all_loaded_modules() {
    let program = link_sources(
        &["module lib def pi: 3.14;", "pi;"],
        InputMode::Expression,
    )
    .unwrap();
    let ws = &program.workspace;
    assert_eq!(ws.module(program.target).name, "<input>");
    assert_eq!(ws.module(program.target).imports.len(), 1);
}

#[test]
fn merge_appends_imports_in_load_order() {
    let mut ws = Workspace::new();
    let a = ws.alloc_module("a".into());
    let b = ws.alloc_module("b".into());
    let target = ws.alloc_module("<input>".into());

    merge_context(&mut ws, target);

    let imported: Vec<_> = ws.module(target).imports.iter().map(|i| i.module).collect();
    assert_eq!(imported, vec![a, b]);
    assert!(ws.module(a).imports.is_empty());
    assert!(ws.module(b).imports.is_empty());
}

#[test]
fn merging_twice_duplicates_imports_without_changing_results() {
    // link() already merged once for expression mode; merge again by hand.
    let mut program = link_sources(
        &["module lib def pi: 3;", "pi;"],
        InputMode::Expression,
    )
    .unwrap();
    let target = program.target;
    let expr = first_evaluation(&program);
    let before = crate::evaluator::evaluate(&program.workspace, expr).unwrap();

    merge_context(&mut program.workspace, target);

    let imports = &program.workspace.module(target).imports;
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0], imports[1]);

    // Lookup is by first match, so the duplicate import changes nothing.
    let after = crate::evaluator::evaluate(&program.workspace, expr).unwrap();
    assert_eq!(before, after);
}

#[test]
fn first_loaded_definition_wins_on_name_collision() {
    let program = link_sources(
        &[
            "module first def tau: 6.28;",
            "module second def tau: 6.283;",
            "tau;",
        ],
        InputMode::Expression,
    )
    .unwrap();
    let ws = &program.workspace;
    let expr = first_evaluation(&program);
    let Expr::Call {
        callee: Callee::Definition(def),
        ..
    } = ws.expr(expr)
    else {
        panic!("expected call");
    };
    // `first` was loaded before `second`, so its definition resolves.
    let first_tau = ws.definitions(ModuleId::new(0)).next().unwrap();
    assert_eq!(*def, first_tau);
}

#[test]
fn own_definitions_take_precedence_over_imports() {
    let program = link_sources(
        &["module lib def x: 1;", "def x: 2; x;"],
        InputMode::Expression,
    )
    .unwrap();
    let ws = &program.workspace;
    let expr = first_evaluation(&program);
    let Expr::Call {
        callee: Callee::Definition(def),
        ..
    } = ws.expr(expr)
    else {
        panic!("expected call");
    };
    let own = ws.definitions(program.target).next().unwrap();
    assert_eq!(*def, own);
}
