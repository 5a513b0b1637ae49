use bigdecimal::BigDecimal;
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use crate::parser::error::convert_pest_error;
use crate::parser::{
    ParseError, ParseErrorKind, ParsedDefinition, ParsedExpr, ParsedImport, ParsedModule,
    ParsedParameter, ParsedStatement, Span,
};
use crate::syntax::BinOp;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct CalcParser;

lazy_static! {
    // Precedence is defined lowest to highest; all operators associate left.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left) | Op::infix(Rule::div, Assoc::Left));
}

/// Parse a complete `.calc` module (with its `module <name>` header).
pub fn parse_module(source: &str) -> Result<ParsedModule, ParseError> {
    let file = CalcParser::parse(Rule::module_file, source)
        .map_err(|e| convert_pest_error(e, source))?
        .next()
        .expect("pest yields exactly one module_file pair");

    let mut name = String::new();
    let mut imports = Vec::new();
    let mut statements = Vec::new();

    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::qualified_name => name = pair.as_str().to_string(),
            Rule::import_clause => {
                let target = pair
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::qualified_name)
                    .expect("import clause names a module");
                imports.push(ParsedImport {
                    module: target.as_str().to_string(),
                    span: target.as_span().into(),
                });
            }
            Rule::definition => statements.push(ParsedStatement::Definition(build_definition(
                pair, source,
            )?)),
            Rule::evaluation => statements.push(ParsedStatement::Evaluation(build_expr(
                inner_expression(pair),
                source,
            )?)),
            Rule::kw_module | Rule::EOI => {}
            rule => unreachable!("unexpected rule in module: {:?}", rule),
        }
    }

    Ok(ParsedModule {
        name,
        imports,
        statements,
    })
}

/// Parse ad-hoc input: a headerless statement sequence where the trailing
/// expression may omit its semicolon. The result is wrapped in a synthetic
/// module named `<input>`.
pub fn parse_adhoc(source: &str) -> Result<ParsedModule, ParseError> {
    let file = CalcParser::parse(Rule::adhoc_file, source)
        .map_err(|e| convert_pest_error(e, source))?
        .next()
        .expect("pest yields exactly one adhoc_file pair");

    let mut statements = Vec::new();
    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::definition => statements.push(ParsedStatement::Definition(build_definition(
                pair, source,
            )?)),
            Rule::evaluation => statements.push(ParsedStatement::Evaluation(build_expr(
                inner_expression(pair),
                source,
            )?)),
            Rule::expression => {
                statements.push(ParsedStatement::Evaluation(build_expr(pair, source)?))
            }
            Rule::EOI => {}
            rule => unreachable!("unexpected rule in ad-hoc input: {:?}", rule),
        }
    }

    Ok(ParsedModule {
        name: "<input>".to_string(),
        imports: Vec::new(),
        statements,
    })
}

/// The single `expression` child of an `evaluation` or `grouped` pair.
fn inner_expression(pair: Pair<'_, Rule>) -> Pair<'_, Rule> {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::expression)
        .expect("rule wraps exactly one expression")
}

fn build_definition(pair: Pair<'_, Rule>, source: &str) -> Result<ParsedDefinition, ParseError> {
    let mut name = String::new();
    let mut name_span = Span::new(0, 0);
    let mut params = Vec::new();
    let mut body = None;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::ident => {
                name = part.as_str().to_string();
                name_span = part.as_span().into();
            }
            Rule::param_list => {
                params = part
                    .into_inner()
                    .map(|p| ParsedParameter {
                        name: p.as_str().to_string(),
                        span: p.as_span().into(),
                    })
                    .collect();
            }
            Rule::expression => body = Some(build_expr(part, source)?),
            Rule::kw_def => {}
            rule => unreachable!("unexpected rule in definition: {:?}", rule),
        }
    }

    Ok(ParsedDefinition {
        name,
        name_span,
        params,
        body: body.expect("definition has a body expression"),
    })
}

fn build_expr(pair: Pair<'_, Rule>, source: &str) -> Result<ParsedExpr, ParseError> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::number => {
                let text = primary.as_str();
                text.parse::<BigDecimal>().map(ParsedExpr::Number).map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: text.to_string(),
                        },
                        source.to_string(),
                        primary.as_span().into(),
                    )
                })
            }
            Rule::grouped => build_expr(inner_expression(primary), source),
            Rule::call => {
                let mut inner = primary.into_inner();
                let name = inner.next().expect("call starts with an identifier");
                let name_span: Span = name.as_span().into();
                let args = match inner.next() {
                    Some(arg_list) => arg_list
                        .into_inner()
                        .map(|arg| build_expr(arg, source))
                        .collect::<Result<Vec<_>, _>>()?,
                    None => Vec::new(),
                };
                Ok(ParsedExpr::Call {
                    name: name.as_str().to_string(),
                    span: name_span,
                    args,
                })
            }
            rule => unreachable!("unexpected primary rule: {:?}", rule),
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinOp::Add,
                Rule::sub => BinOp::Sub,
                Rule::mul => BinOp::Mul,
                Rule::div => BinOp::Div,
                rule => unreachable!("unexpected infix rule: {:?}", rule),
            };
            Ok(ParsedExpr::Binary {
                op,
                left: Box::new(lhs?),
                right: Box::new(rhs?),
            })
        })
        .parse(pair.into_inner())
}
