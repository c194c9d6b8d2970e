//! Tokenizer and recursive-descent parser for constraint expressions
//!
//! Grammar:
//!
//! ```text
//! expr       := and_expr ( "||" and_expr )*
//! and_expr   := unary ( "&&" unary )*
//! unary      := "!" unary | primary
//! primary    := "(" expr ")" | operand comparator operand
//! operand    := "value" | integer
//! comparator := "==" | "!=" | "<" | ">" | "<=" | ">="
//! ```
//!
//! Nesting is capped at [`MAX_DEPTH`] so that parsing, evaluating and
//! dropping an expression stay within a bounded stack.

use super::expr::{Comparator, Expr, Operand};
use super::{ConstraintError, ConstraintErrorKind, ConstraintResult};

/// Deepest nesting of `!`, parentheses and `&&`/`||` chains an expression may have
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Value,
    Int(i64),
    Cmp(Comparator),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl Token {
    fn describe(self) -> String {
        match self {
            Token::Value => "`value`".to_string(),
            Token::Int(n) => format!("`{}`", n),
            Token::Cmp(op) => format!("`{}`", op),
            Token::And => "`&&`".to_string(),
            Token::Or => "`||`".to_string(),
            Token::Not => "`!`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
        }
    }
}

/// Parse an expression into its syntax tree
pub(super) fn parse(expression: &str) -> ConstraintResult<Expr> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(ConstraintError::new(expression, 0, ConstraintErrorKind::Empty));
    }

    let mut parser = Parser {
        expression,
        tokens,
        pos: 0,
        depth: 0,
    };
    let (expr, _) = parser.parse_or()?;
    if let Some(&(token, offset)) = parser.tokens.get(parser.pos) {
        return Err(ConstraintError::new(
            expression,
            offset,
            ConstraintErrorKind::TrailingInput(token.describe()),
        ));
    }
    Ok(expr)
}

fn tokenize(expression: &str) -> ConstraintResult<Vec<(Token, usize)>> {
    let fail = |offset: usize, kind: ConstraintErrorKind| Err(ConstraintError::new(expression, offset, kind));

    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '=' => match chars.next_if(|&(_, c)| c == '=') {
                Some(_) => Token::Cmp(Comparator::Eq),
                None => return fail(offset, ConstraintErrorKind::UnexpectedCharacter('=')),
            },
            '!' => match chars.next_if(|&(_, c)| c == '=') {
                Some(_) => Token::Cmp(Comparator::Ne),
                None => Token::Not,
            },
            '<' => match chars.next_if(|&(_, c)| c == '=') {
                Some(_) => Token::Cmp(Comparator::Le),
                None => Token::Cmp(Comparator::Lt),
            },
            '>' => match chars.next_if(|&(_, c)| c == '=') {
                Some(_) => Token::Cmp(Comparator::Ge),
                None => Token::Cmp(Comparator::Gt),
            },
            '&' => match chars.next_if(|&(_, c)| c == '&') {
                Some(_) => Token::And,
                None => return fail(offset, ConstraintErrorKind::UnexpectedCharacter('&')),
            },
            '|' => match chars.next_if(|&(_, c)| c == '|') {
                Some(_) => Token::Or,
                None => return fail(offset, ConstraintErrorKind::UnexpectedCharacter('|')),
            },
            c if c.is_ascii_digit() || (c == '-' && chars.peek().is_some_and(|&(_, d)| d.is_ascii_digit())) => {
                let mut end = offset + c.len_utf8();
                while let Some((i, d)) = chars.next_if(|&(_, d)| d.is_ascii_digit()) {
                    end = i + d.len_utf8();
                }
                match expression[offset..end].parse::<i64>() {
                    Ok(n) => Token::Int(n),
                    Err(_) => return fail(offset, ConstraintErrorKind::IntegerOverflow),
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = offset + c.len_utf8();
                while let Some((i, d)) = chars.next_if(|&(_, d)| d.is_alphanumeric() || d == '_') {
                    end = i + d.len_utf8();
                }
                match &expression[offset..end] {
                    "value" => Token::Value,
                    other => {
                        return fail(offset, ConstraintErrorKind::UnknownIdentifier(other.to_string()))
                    }
                }
            }
            other => return fail(offset, ConstraintErrorKind::UnexpectedCharacter(other)),
        };
        tokens.push((token, offset));
    }

    Ok(tokens)
}

struct Parser<'a> {
    expression: &'a str,
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

/// A subtree and its height
type Branch = (Expr, usize);

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|&(token, _)| token)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.expression.len(), |&(_, offset)| offset)
    }

    fn next(&mut self, expected: &'static str) -> ConstraintResult<(Token, usize)> {
        match self.tokens.get(self.pos) {
            Some(&entry) => {
                self.pos += 1;
                Ok(entry)
            }
            None => Err(ConstraintError::new(
                self.expression,
                self.expression.len(),
                ConstraintErrorKind::UnexpectedEnd { expected },
            )),
        }
    }

    fn unexpected(&self, token: Token, offset: usize, expected: &'static str) -> ConstraintError {
        ConstraintError::new(
            self.expression,
            offset,
            ConstraintErrorKind::UnexpectedToken {
                found: token.describe(),
                expected,
            },
        )
    }

    fn too_deep(&self, offset: usize) -> ConstraintError {
        ConstraintError::new(
            self.expression,
            offset,
            ConstraintErrorKind::TooDeep { limit: MAX_DEPTH },
        )
    }

    /// Enter a nested `!` or `(`
    fn descend(&mut self, offset: usize) -> ConstraintResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.too_deep(offset));
        }
        Ok(())
    }

    /// Join two subtrees under a binary operator, keeping the tree within `MAX_DEPTH`
    fn join(
        &self,
        offset: usize,
        (lhs, lhs_height): Branch,
        (rhs, rhs_height): Branch,
        combine: fn(Box<Expr>, Box<Expr>) -> Expr,
    ) -> ConstraintResult<Branch> {
        let height = lhs_height.max(rhs_height) + 1;
        if height > MAX_DEPTH {
            return Err(self.too_deep(offset));
        }
        Ok((combine(Box::new(lhs), Box::new(rhs)), height))
    }

    fn parse_or(&mut self) -> ConstraintResult<Branch> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(Token::Or) {
            let offset = self.offset();
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = self.join(offset, lhs, rhs, Expr::Or)?;
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> ConstraintResult<Branch> {
        let mut lhs = self.parse_unary()?;
        while self.peek() == Some(Token::And) {
            let offset = self.offset();
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = self.join(offset, lhs, rhs, Expr::And)?;
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ConstraintResult<Branch> {
        if self.peek() == Some(Token::Not) {
            let offset = self.offset();
            self.descend(offset)?;
            self.pos += 1;
            let (inner, height) = self.parse_unary()?;
            self.depth -= 1;
            if height + 1 > MAX_DEPTH {
                return Err(self.too_deep(offset));
            }
            return Ok((Expr::Not(Box::new(inner)), height + 1));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ConstraintResult<Branch> {
        if self.peek() == Some(Token::LParen) {
            self.descend(self.offset())?;
            self.pos += 1;
            let inner = self.parse_or()?;
            self.depth -= 1;
            return match self.next("`)`")? {
                (Token::RParen, _) => Ok(inner),
                (token, offset) => Err(self.unexpected(token, offset, "`)`")),
            };
        }

        let left = self.parse_operand()?;
        let op = match self.next("a comparator")? {
            (Token::Cmp(op), _) => op,
            (token, offset) => return Err(self.unexpected(token, offset, "a comparator")),
        };
        let right = self.parse_operand()?;
        Ok((Expr::Compare { left, op, right }, 1))
    }

    fn parse_operand(&mut self) -> ConstraintResult<Operand> {
        match self.next("`value` or an integer")? {
            (Token::Value, _) => Ok(Operand::Value),
            (Token::Int(n), _) => Ok(Operand::Literal(n)),
            (token, offset) => Err(self.unexpected(token, offset, "`value` or an integer")),
        }
    }
}
