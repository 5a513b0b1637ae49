//! Public facade: parse, link, validate and evaluate in one call.

mod calculator;
mod error;

#[cfg(test)]
mod calculator_test;

pub use calculator::{Calculation, Calculator, Evaluated};
pub use error::CalcError;
