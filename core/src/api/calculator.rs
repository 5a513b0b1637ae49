//! The calculation facade driven by the CLI and embedders.

use bigdecimal::BigDecimal;
use tracing::debug;

use crate::api::CalcError;
use crate::diagnostics::{Diagnostic, Severity};
use crate::linker::{InputMode, link};
use crate::parser::{ParsedModule, parse_adhoc, parse_module};
use crate::syntax::Statement;
use crate::{evaluator, serializer, validator};

/// One evaluated statement: the expression rendered back to source text and
/// its computed value, in module statement order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub rendered: String,
    pub value: BigDecimal,
}

/// Outcome of a successful run: every evaluation result plus any non-gating
/// diagnostics (warnings) that were reported along the way.
#[derive(Debug)]
pub struct Calculation {
    pub diagnostics: Vec<Diagnostic>,
    pub results: Vec<Evaluated>,
}

#[derive(Debug)]
struct Input {
    module: ParsedModule,
    mode: InputMode,
}

/// Drives the pipeline: context sources and one input (a module file or an
/// ad-hoc expression) in, evaluation results out.
///
/// Context sources are parsed as complete modules when added; load order is
/// the order of `add_context_source` calls, with the input module last. In
/// expression mode every context module is merged into the input's scope;
/// in file mode only the input's own declared imports apply.
#[derive(Debug, Default)]
pub struct Calculator {
    context: Vec<ParsedModule>,
    input: Option<Input>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a context module.
    pub fn add_context_source(&mut self, source: &str) -> Result<(), CalcError> {
        let module = parse_module(source)?;
        debug!(module = %module.name, "loaded context module");
        self.context.push(module);
        Ok(())
    }

    /// Use a complete module as the input (file mode).
    pub fn set_input_module(&mut self, source: &str) -> Result<(), CalcError> {
        let module = parse_module(source)?;
        self.input = Some(Input {
            module,
            mode: InputMode::File,
        });
        Ok(())
    }

    /// Use ad-hoc statements as the input (expression mode).
    pub fn set_input_expression(&mut self, source: &str) -> Result<(), CalcError> {
        let module = parse_adhoc(source)?;
        self.input = Some(Input {
            module,
            mode: InputMode::Expression,
        });
        Ok(())
    }

    /// Link, validate and evaluate. Error-severity diagnostics gate
    /// evaluation entirely; the first failing evaluation aborts the run.
    pub fn calculate(&self) -> Result<Calculation, CalcError> {
        let input = self.input.as_ref().ok_or(CalcError::NoInput)?;

        let mut modules: Vec<&ParsedModule> = self.context.iter().collect();
        modules.push(&input.module);

        let program = link(&modules, input.mode)
            .map_err(|e| CalcError::Invalid {
                diagnostics: e.diagnostics,
            })?;

        let diagnostics = validator::validate(&program);
        if diagnostics.iter().any(|d| d.severity == Severity::Error) {
            return Err(CalcError::Invalid { diagnostics });
        }

        let ws = &program.workspace;
        let mut results = Vec::new();
        for statement in &ws.module(program.target).statements {
            if let Statement::Evaluation(expr) = *statement {
                let rendered = serializer::render(ws, expr);
                match evaluator::evaluate(ws, expr) {
                    Ok(value) => results.push(Evaluated { rendered, value }),
                    Err(source) => {
                        return Err(CalcError::Eval {
                            expression: rendered,
                            source,
                        });
                    }
                }
            }
        }

        Ok(Calculation {
            diagnostics,
            results,
        })
    }
}
