//! Core library for the abacus arithmetic modeling language.
//!
//! A `.calc` module is a list of named function definitions and evaluation
//! statements over exact decimal arithmetic. The pipeline mirrors the
//! surface it serves:
//!
//! 1. [`parser`] turns source text into a parse tree,
//! 2. [`linker`] lowers parse trees into a [`syntax::Workspace`] arena,
//!    resolving every call to the definition or parameter it names (and, for
//!    ad-hoc expressions, merging all loaded context modules into scope),
//! 3. [`validator`] reports diagnostics that gate evaluation,
//! 4. [`evaluator`] computes each evaluation statement to a `BigDecimal`,
//! 5. [`serializer`] renders expressions back to surface syntax for output.
//!
//! [`api::Calculator`] drives the whole pipeline for embedders and the CLI.

pub mod api;
pub mod diagnostics;
pub mod evaluator;
pub mod linker;
pub mod parser;
pub mod serializer;
pub mod syntax;
pub mod validator;
