//! Boolean search queries.
//!
//! Parses user-typed queries like `word1 AND (word2 OR "word three")` into postfix expressions,
//! and evaluates them through caller-supplied combinators:
//!
//! ```text
//! raw string -> tokenize -> correct_grammar -> to_postfix -> evaluate(logic) -> result
//! ```
//!
//! Malformed queries are never rejected, they are corrected to the closest well-formed query.

use tracing::instrument;

pub mod error;
pub mod eval;
pub mod glob;
pub mod grammar;
pub mod logic;
pub mod matcher;
pub mod postfix;
pub mod token;
pub mod tokenize;

pub use error::EvalError;
pub use eval::{evaluate, evaluate_literals};
pub use glob::GlobPattern;
pub use grammar::correct_grammar;
pub use logic::{fn_logic, fn_negation, BoolLogic, Infix, Logic, Negation};
pub use matcher::TextMatcher;
pub use postfix::to_postfix;
pub use token::{Operator, Postfix, PostfixToken, QueryText, Token};
pub use tokenize::tokenize;


/// Parse a query string into a postfix expression.
#[instrument(level = "debug")]
pub fn parse(query: &str) -> Postfix {
    to_postfix(&correct_grammar(tokenize(query)))
}

/// A parsed query, keeping its intermediate forms around for inspection.
#[derive(Clone, Debug)]
pub struct BooleanQuery {
    source: String,
    tokens: Vec<Token>,
    postfix: Postfix,
}

impl BooleanQuery {
    #[instrument(level = "debug")]
    pub fn parse(source: &str) -> Self {
        let tokens = correct_grammar(tokenize(source));
        let postfix = to_postfix(&tokens);

        Self {
            source: source.to_string(),
            tokens,
            postfix,
        }
    }

    /// The original query string
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The grammar corrected tokens
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn postfix(&self) -> &[PostfixToken] {
        &self.postfix
    }

    pub fn into_postfix(self) -> Postfix {
        self.postfix
    }

    /// Whether the query has no terms, i.e. imposes no condition.
    pub fn is_empty(&self) -> bool {
        self.postfix.is_empty()
    }

    /// Evaluate the query, see [evaluate].
    pub fn eval<L, F>(&self, logic: &mut L, operand: F) -> Result<Option<L::Output>, EvalError>
    where
        L: Logic,
        F: FnMut(&str) -> L::Output,
    {
        evaluate(&self.postfix, logic, operand)
    }

    /// Render the query as a fully parenthesized infix string.
    ///
    /// The empty query renders as an empty string.
    pub fn to_infix(&self) -> Result<String, EvalError> {
        let infix = evaluate(&self.postfix, &mut Infix, |text| {
            PostfixToken::literal(text).to_string()
        })?;
        Ok(infix.unwrap_or_default())
    }

    /// Prepare the query for matching lines of text.
    pub fn matcher(&self, wildcard: bool) -> Result<TextMatcher, EvalError> {
        TextMatcher::new(&self.postfix, wildcard)
    }

    /// Match a single line of text. The empty query matches everything.
    ///
    /// Use [BooleanQuery::matcher] when matching many lines.
    pub fn matches(&self, text: &str, wildcard: bool) -> Result<bool, EvalError> {
        Ok(self.matcher(wildcard)?.is_match(text))
    }
}
