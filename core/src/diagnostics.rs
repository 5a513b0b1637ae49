//! Diagnostics shared by the linker and validator.
//!
//! Error-severity diagnostics gate evaluation; warnings are reported and
//! evaluation proceeds.

use core::fmt;

use crate::parser::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable short code, e.g. `L001` (linker) or `V003` (validator).
    pub code: &'static str,
    /// Name of the module the diagnostic is about.
    pub module: String,
    pub message: String,
    /// Byte range in the module's source, when one is known.
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(code: &'static str, module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, module, message)
    }

    pub fn warning(
        code: &'static str,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, module, message)
    }

    fn new(
        severity: Severity,
        code: &'static str,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            module: module.into(),
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] in module '{}': {}",
            self.severity, self.code, self.module, self.message
        )?;
        if let Some(span) = &self.span {
            write!(f, " at {}..{}", span.0.start, span.0.end)?;
        }
        Ok(())
    }
}
