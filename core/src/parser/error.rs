use core::fmt;

use crate::parser::{Rule, Span};

/// Parse failure with the offending source attached for rendering.
#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

#[derive(Debug)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken { expected: String, found: String },
    /// Number literal that does not form a valid decimal
    InvalidNumber { text: String },
    /// Catch-all for pest errors not specifically handled
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self { kind, source, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)?;
            }
            ParseErrorKind::InvalidNumber { text } => {
                write!(f, "invalid number literal '{}'", text)?;
            }
            ParseErrorKind::Other { message } => {
                write!(f, "{}", message)?;
            }
        }
        write!(f, " at {}..{}", self.span.0.start, self.span.0.end)
    }
}

impl std::error::Error for ParseError {}

/// Convert a raw pest error into a human-readable [`ParseError`].
pub(crate) fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::{ErrorVariant, InputLocation};

    let span = match err.location {
        InputLocation::Pos(pos) => Span::new(pos, pos),
        InputLocation::Span((start, end)) => Span::new(start, end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => ParseErrorKind::UnexpectedToken {
            expected: describe_rules(&positives),
            found: describe_found(&negatives, source, &span),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Group expected rules into surface-level concepts.
fn describe_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();
    for rule in rules {
        let concept = match rule {
            Rule::number => "a number",
            Rule::ident | Rule::call => "an identifier",
            Rule::qualified_name => "a module name",
            Rule::add | Rule::sub | Rule::mul | Rule::div | Rule::bin_op => "an operator",
            Rule::definition | Rule::evaluation | Rule::statement | Rule::kw_def => "a statement",
            Rule::kw_module | Rule::module_file => "a module header",
            Rule::kw_import | Rule::import_clause => "an import",
            Rule::param_list | Rule::arg_list => "a parameter list",
            Rule::EOI => "end of input",
            _ => "an expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.len() {
        0 => "something else".to_string(),
        1 => concepts[0].to_string(),
        _ => {
            let last = concepts.pop().expect("non-empty");
            format!("{} or {}", concepts.join(", "), last)
        }
    }
}

fn describe_found(negatives: &[Rule], source: &str, span: &Span) -> String {
    if let Some(rule) = negatives.first() {
        return format!("{:?}", rule);
    }
    let rest = &source[span.0.start.min(source.len())..];
    match rest.chars().next() {
        Some(c) if !c.is_whitespace() => format!("'{}'", c),
        _ => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_span() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: "an expression".to_string(),
                found: "';'".to_string(),
            },
            "1 + ;".to_string(),
            Span::new(4, 5),
        );
        assert_eq!(
            error.to_string(),
            "expected an expression, found ';' at 4..5"
        );
    }

    #[test]
    fn expected_rules_are_grouped() {
        let described = describe_rules(&[Rule::number, Rule::grouped, Rule::call]);
        assert_eq!(described, "a number, an expression or an identifier");
    }
}
