//! Constraint syntax tree and its evaluation

/// One side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The encoded answer
    Value,
    /// An integer literal
    Literal(i64),
}

impl Operand {
    fn resolve(self, value: i64) -> i64 {
        match self {
            Operand::Value => value,
            Operand::Literal(n) => n,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Value => write!(f, "value"),
            Operand::Literal(n) => write!(f, "{}", n),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Comparator {
    fn apply(self, left: i64, right: i64) -> bool {
        match self {
            Comparator::Eq => left == right,
            Comparator::Ne => left != right,
            Comparator::Lt => left < right,
            Comparator::Gt => left > right,
            Comparator::Le => left <= right,
            Comparator::Ge => left >= right,
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Lt => "<",
            Comparator::Gt => ">",
            Comparator::Le => "<=",
            Comparator::Ge => ">=",
        };
        f.write_str(symbol)
    }
}

/// A parsed constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Compare {
        left: Operand,
        op: Comparator,
        right: Operand,
    },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate against the encoded answer. Total: never fails.
    pub fn evaluate(&self, value: i64) -> bool {
        match self {
            Expr::Compare { left, op, right } => op.apply(left.resolve(value), right.resolve(value)),
            Expr::Not(inner) => !inner.evaluate(value),
            Expr::And(lhs, rhs) => lhs.evaluate(value) && rhs.evaluate(value),
            Expr::Or(lhs, rhs) => lhs.evaluate(value) || rhs.evaluate(value),
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Compare { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Not(inner) => write!(f, "!({})", inner),
            Expr::And(lhs, rhs) => write!(f, "({} && {})", lhs, rhs),
            Expr::Or(lhs, rhs) => write!(f, "({} || {})", lhs, rhs),
        }
    }
}
