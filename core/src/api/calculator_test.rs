//! End-to-end tests through the `Calculator` facade.

use indoc::indoc;
use pretty_assertions::assert_eq;

use super::*;
use crate::diagnostics::Severity;
use crate::evaluator::EvalError;

fn lines(calculation: &Calculation) -> Vec<String> {
    calculation
        .results
        .iter()
        .map(|r| format!("- {}: {}", r.rendered, r.value))
        .collect()
}

#[test]
fn no_input_is_an_error() {
    let calculator = Calculator::new();
    assert!(matches!(calculator.calculate(), Err(CalcError::NoInput)));
}

#[test]
fn file_mode_evaluates_statements_in_order() {
    let mut calculator = Calculator::new();
    calculator
        .set_input_module(indoc! {"
            module math

            def square(x): x * x;

            1 + 2;
            square(4);
            1 / 2;
        "})
        .unwrap();

    let calculation = calculator.calculate().unwrap();
    assert_eq!(
        lines(&calculation),
        vec![
            "- 1 + 2: 3",
            "- square(4): 16",
            "- 1 / 2: 0.50000000000000000000",
        ]
    );
    assert!(calculation.diagnostics.is_empty());
}

#[test]
fn file_mode_resolves_declared_imports() {
    let mut calculator = Calculator::new();
    calculator
        .add_context_source("module lib def pi: 3.14;")
        .unwrap();
    calculator
        .set_input_module("module main import lib pi * 2;")
        .unwrap();

    let calculation = calculator.calculate().unwrap();
    assert_eq!(lines(&calculation), vec!["- pi * 2: 6.28"]);
}

#[test]
fn file_mode_ignores_unimported_context() {
    let mut calculator = Calculator::new();
    calculator
        .add_context_source("module lib def pi: 3.14;")
        .unwrap();
    calculator.set_input_module("module main pi;").unwrap();

    let Err(CalcError::Invalid { diagnostics }) = calculator.calculate() else {
        panic!("expected gating diagnostics");
    };
    assert_eq!(diagnostics[0].code, "L001");
}

#[test]
fn expression_mode_sees_all_context_modules() {
    let mut calculator = Calculator::new();
    calculator
        .add_context_source("module lib def pi: 3.14;")
        .unwrap();
    calculator
        .add_context_source("module util def double(x): x * 2;")
        .unwrap();
    calculator.set_input_expression("double(pi)").unwrap();

    let calculation = calculator.calculate().unwrap();
    assert_eq!(lines(&calculation), vec!["- double(pi): 6.28"]);
}

#[test]
fn expression_mode_reports_collision_warnings_but_still_runs() {
    let mut calculator = Calculator::new();
    calculator
        .add_context_source("module first def tau: 6.28;")
        .unwrap();
    calculator
        .add_context_source("module second def tau: 6.283;")
        .unwrap();
    calculator.set_input_expression("tau").unwrap();

    let calculation = calculator.calculate().unwrap();
    assert_eq!(calculation.diagnostics.len(), 1);
    assert_eq!(calculation.diagnostics[0].severity, Severity::Warning);
    assert_eq!(calculation.diagnostics[0].code, "V101");
    // First-loaded wins.
    assert_eq!(lines(&calculation), vec!["- tau: 6.28"]);
}

#[test]
fn validation_errors_gate_evaluation() {
    let mut calculator = Calculator::new();
    calculator
        .set_input_expression("def f(x): x; f(1, 2)")
        .unwrap();

    let Err(CalcError::Invalid { diagnostics }) = calculator.calculate() else {
        panic!("expected gating diagnostics");
    };
    assert_eq!(diagnostics[0].code, "V003");
}

#[test]
fn first_failing_evaluation_aborts_the_run() {
    let mut calculator = Calculator::new();
    calculator
        .set_input_expression("1 + 1; 1 / (3 - 3); 2 + 2;")
        .unwrap();

    let Err(CalcError::Eval { expression, source }) = calculator.calculate() else {
        panic!("expected evaluation failure");
    };
    assert_eq!(expression, "1 / (3 - 3)");
    assert!(matches!(source, EvalError::DivisionByZero));
}

#[test]
fn runaway_recursion_surfaces_as_an_eval_error() {
    let mut calculator = Calculator::new();
    calculator
        .set_input_expression("def a: b; def b: a; a")
        .unwrap();

    let Err(CalcError::Eval { source, .. }) = calculator.calculate() else {
        panic!("expected evaluation failure");
    };
    assert!(matches!(source, EvalError::RecursionLimit { .. }));
}

#[test]
fn parse_errors_surface_from_input_setters() {
    let mut calculator = Calculator::new();
    assert!(matches!(
        calculator.set_input_expression("1 +"),
        Err(CalcError::Parse(_))
    ));
    assert!(matches!(
        calculator.set_input_module("1 + 2;"),
        Err(CalcError::Parse(_))
    ));
}
