//! Abacus - an arithmetic modeling language with exact decimal results.
//!
//! # Overview
//!
//! Abacus evaluates `.calc` modules: named function definitions plus
//! evaluation statements over `+ - * /`, computed on arbitrary-precision
//! decimals (division rounds half-up at 20 fractional digits). Modules can
//! import each other, and ad-hoc expressions automatically see every loaded
//! context module.
//!
//! # Quick Start
//!
//! ```ignore
//! use abacus::Calculator;
//!
//! let mut calculator = Calculator::new();
//! calculator.add_context_source("module lib def double(x): x * 2;")?;
//! calculator.set_input_expression("double(21)")?;
//!
//! let calculation = calculator.calculate()?;
//! assert_eq!(calculation.results[0].value.to_string(), "42");
//! ```
//!
//! The pipeline underneath (parse, link, validate, evaluate, render) is
//! exposed through the re-exported `abacus_core` modules for embedders that
//! need finer control.

// Re-export the public API from abacus-core.
pub use abacus_core::api::{CalcError, Calculation, Calculator, Evaluated};
pub use abacus_core::diagnostics::{Diagnostic, Severity};
pub use abacus_core::evaluator::{
    DEFAULT_MAX_DEPTH, DIV_SCALE, EvalError, Environment, evaluate, evaluate_in,
    evaluate_with_limits,
};
pub use abacus_core::{diagnostics, evaluator, linker, parser, serializer, syntax, validator};

mod render;
pub use render::{render_error, render_error_to, render_error_to_string};
