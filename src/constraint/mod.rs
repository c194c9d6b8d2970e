//! Edge constraints: a small closed expression language
//!
//! A constraint compares the encoded answer (`value`) against integer
//! literals, e.g. `value == 1`. Comparisons may be combined with `&&`, `||`,
//! `!` and parentheses. Nothing else is reachable from an expression.

mod expr;
mod parse;

pub use expr::{Comparator, Expr, Operand};
pub use parse::MAX_DEPTH;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong while parsing a constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintErrorKind {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),

    #[error("unknown identifier `{0}`; only `value` is bound")]
    UnknownIdentifier(String),

    #[error("integer literal out of range")]
    IntegerOverflow,

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { found: String, expected: &'static str },

    #[error("expected {expected}, found end of expression")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected {0} after complete expression")]
    TrailingInput(String),

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// A malformed constraint expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid constraint `{expression}` at offset {offset}: {kind}")]
pub struct ConstraintError {
    /// The offending expression text
    pub expression: String,
    /// Byte offset of the problem
    pub offset: usize,
    /// The problem itself
    pub kind: ConstraintErrorKind,
}

impl ConstraintError {
    fn new(expression: &str, offset: usize, kind: ConstraintErrorKind) -> Self {
        Self {
            expression: expression.to_string(),
            offset,
            kind,
        }
    }
}

/// Result type for constraint parsing
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// A parsed constraint, keeping its source text
///
/// Serializes as the source text; deserializing parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Constraint {
    source: String,
    expr: Expr,
}

impl Constraint {
    /// Parse a constraint expression
    pub fn parse(expression: impl Into<String>) -> ConstraintResult<Self> {
        let source = expression.into();
        let expr = parse::parse(&source)?;
        Ok(Self { source, expr })
    }

    /// Evaluate against the encoded answer
    pub fn evaluate(&self, value: i64) -> bool {
        self.expr.evaluate(value)
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The parsed syntax tree
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Constraint {
    type Error = ConstraintError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Constraint> for String {
    fn from(constraint: Constraint) -> Self {
        constraint.source
    }
}

/// Parse and evaluate an expression in one step
pub fn evaluate(expression: &str, value: i64) -> ConstraintResult<bool> {
    Ok(Constraint::parse(expression)?.evaluate(value))
}
