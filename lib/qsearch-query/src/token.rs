//! Tokens of the boolean query language

use std::fmt;

/// Query operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
    And,
    Or,
    GroupOpen,
    GroupClose,
}

impl Operator {
    /// Look up the operator spelled by an unquoted token, if any.
    pub fn from_keyword(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("AND") {
            Some(Self::And)
        } else if text.eq_ignore_ascii_case("OR") {
            Some(Self::Or)
        } else if text == "(" {
            Some(Self::GroupOpen)
        } else if text == ")" {
            Some(Self::GroupClose)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::GroupOpen => "(",
            Self::GroupClose => ")",
        }
    }
}

/// A token produced by the tokenizer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Literal(String),
    Op(Operator),
}

impl Token {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Self::Op(op)
    }
}

/// A token of a postfix expression. Grouping has been resolved, so there are no parentheses.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PostfixToken {
    Literal(String),
    And,
    Or,
}

impl PostfixToken {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }
}

/// A postfix (reverse polish) expression
pub type Postfix = Vec<PostfixToken>;

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write_literal(f, text),
            Self::Op(op) => f.write_str(op.as_str()),
        }
    }
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write_literal(f, text),
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

/// Displays a token stream as query text, tokens separated by spaces.
#[derive(Clone, Copy, Debug)]
pub struct QueryText<'a>(pub &'a [Token]);

impl fmt::Display for QueryText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Writes a literal so that it reads back as the same literal.
fn write_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let needs_quotes = Operator::from_keyword(text).is_some()
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\\' | '(' | ')'));

    if !needs_quotes {
        return f.write_str(text);
    }

    f.write_str("\"")?;
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}
