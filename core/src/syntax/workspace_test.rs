use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;

#[test]
fn modules_iterate_in_load_order() {
    let mut ws = Workspace::new();
    let a = ws.alloc_module("a".into());
    let b = ws.alloc_module("b".into());
    let c = ws.alloc_module("c".into());

    assert_eq!(ws.modules().collect::<Vec<_>>(), vec![a, b, c]);
    assert_eq!(ws.module(b).name, "b");
}

#[test]
fn definitions_follow_statement_order() {
    let mut ws = Workspace::new();
    let module = ws.alloc_module("m".into());

    let f = ws.alloc_definition("f".into());
    let x = ws.alloc_parameter("x".into(), f);
    ws.set_def_params(f, smallvec![x]);
    let body = ws.alloc_expr(Expr::Call {
        callee: Callee::Parameter(x),
        args: smallvec![],
    });
    ws.set_def_body(f, body);

    let g = ws.alloc_definition("g".into());
    let g_body = ws.alloc_expr(Expr::Number(1.into()));
    ws.set_def_body(g, g_body);

    ws.push_statement(module, Statement::Definition(f));
    ws.push_statement(module, Statement::Evaluation(g_body));
    ws.push_statement(module, Statement::Definition(g));

    assert_eq!(ws.definitions(module).collect::<Vec<_>>(), vec![f, g]);
    assert_eq!(ws.param(x).owner, f);
    assert_eq!(ws.definition(f).body, body);
}

#[test]
fn imports_append_in_order() {
    let mut ws = Workspace::new();
    let target = ws.alloc_module("target".into());
    let lib = ws.alloc_module("lib".into());
    let extra = ws.alloc_module("extra".into());

    ws.add_import(target, Import { module: lib });
    ws.add_import(target, Import { module: extra });

    let imported: Vec<_> = ws.module(target).imports.iter().map(|i| i.module).collect();
    assert_eq!(imported, vec![lib, extra]);
    assert!(ws.module(lib).imports.is_empty());
}
