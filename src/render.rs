//! Rendering calculation failures for humans.
//!
//! Parse errors get a full miette report with the offending source span;
//! diagnostics print one per line the way the CLI reports them.

use std::io::Write;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use abacus_core::api::CalcError;

/// Render an error to stderr.
pub fn render_error(error: &CalcError) {
    let _ = render_error_to(error, &mut std::io::stderr());
}

/// Render an error to a specific writer.
pub fn render_error_to(error: &CalcError, writer: &mut dyn Write) -> std::io::Result<()> {
    match error {
        CalcError::Parse(parse) => {
            let report = miette::Report::new(ParseReport {
                message: parse.to_string(),
                src: NamedSource::new("<input>", parse.source.clone()),
                span: source_span(parse.span.0.start, parse.span.0.end),
            });
            write!(writer, "{:?}", report)
        }
        CalcError::Invalid { diagnostics } => {
            for diagnostic in diagnostics {
                writeln!(writer, "{}", diagnostic)?;
            }
            Ok(())
        }
        CalcError::Eval { source, .. } => {
            writeln!(writer, "Error: {}: {}", error, source)
        }
        CalcError::NoInput => writeln!(writer, "Error: {}", error),
    }
}

/// Render an error to a `String` (useful for tests and embedders).
pub fn render_error_to_string(error: &CalcError) -> String {
    let mut buf = Vec::new();
    let _ = render_error_to(error, &mut buf);
    String::from_utf8_lossy(&buf).to_string()
}

fn source_span(start: usize, end: usize) -> SourceSpan {
    (start, end.saturating_sub(start)).into()
}

#[derive(Debug, Error, MietteDiagnostic)]
#[error("{message}")]
struct ParseReport {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}
