//! The parse tree handed to the linker.
//!
//! Names are still strings here; the linker resolves them into workspace
//! ids. Spans are kept on the names later phases diagnose.

use bigdecimal::BigDecimal;

use crate::parser::Span;
use crate::syntax::BinOp;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedModule {
    pub name: String,
    pub imports: Vec<ParsedImport>,
    pub statements: Vec<ParsedStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedImport {
    pub module: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedStatement {
    Definition(ParsedDefinition),
    Evaluation(ParsedExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDefinition {
    pub name: String,
    pub name_span: Span,
    pub params: Vec<ParsedParameter>,
    pub body: ParsedExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParameter {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedExpr {
    Number(BigDecimal),
    Binary {
        op: BinOp,
        left: Box<ParsedExpr>,
        right: Box<ParsedExpr>,
    },
    Call {
        name: String,
        span: Span,
        args: Vec<ParsedExpr>,
    },
}
