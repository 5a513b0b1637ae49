use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::evaluator::EvalError;
use crate::parser::ParseError;

/// Failure of a whole calculation run.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("no input expression or file defined")]
    NoInput,

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Linking or validation reported error-severity diagnostics;
    /// evaluation never ran.
    #[error("the input did not validate")]
    Invalid { diagnostics: Vec<Diagnostic> },

    /// An evaluation statement failed; the run stops at the first failure.
    #[error("evaluation of '{expression}' failed")]
    Eval {
        expression: String,
        source: EvalError,
    },
}
