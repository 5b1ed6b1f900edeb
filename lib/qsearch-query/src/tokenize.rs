//! Query tokenizer

use tracing::trace;

use crate::token::{Operator, Token};

const ESCAPE: char = '\\';
const QUOTE: char = '"';

/// Split a raw query string into literals and operators.
///
/// Never fails: every input string has a tokenization.
///
/// Outside quotes, whitespace delimits tokens, `(` and `)` are single-character operators,
/// `"` opens a quoted literal and `\` escapes the next character.
/// Inside quotes only `"` and `\` are special.
///
/// Only `"` and `\` are escapable. Escaping any other character keeps the backslash,
/// so that later layers (like [crate::glob]) can interpret it.
/// An escaped whitespace character is not escaped at all: the backslash
/// becomes part of the token and the whitespace still ends the token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::default();
    let mut in_quotes = false;
    let mut in_escape = false;

    for c in input.chars() {
        let c = if c.is_whitespace() { ' ' } else { c };

        if in_escape {
            in_escape = false;

            if c == ' ' && !in_quotes {
                tokenizer.acc.push(ESCAPE);
                tokenizer.flush(false);
            } else {
                tokenizer.push_escaped(c);
            }
        } else if in_quotes {
            match c {
                QUOTE => {
                    tokenizer.flush(true);
                    in_quotes = false;
                }
                ESCAPE => in_escape = true,
                c => tokenizer.acc.push(c),
            }
        } else {
            match c {
                ' ' => tokenizer.flush(false),
                '(' => {
                    tokenizer.flush(false);
                    tokenizer.tokens.push(Token::Op(Operator::GroupOpen));
                }
                ')' => {
                    tokenizer.flush(false);
                    tokenizer.tokens.push(Token::Op(Operator::GroupClose));
                }
                ESCAPE => in_escape = true,
                QUOTE => {
                    tokenizer.flush(false);
                    in_quotes = true;
                }
                c => tokenizer.acc.push(c),
            }
        }
    }

    // a dangling escape is a plain backslash
    if in_escape {
        tokenizer.acc.push(ESCAPE);
    }
    tokenizer.flush(in_quotes);

    trace!(?input, tokens = ?tokenizer.tokens, "tokenized");

    tokenizer.tokens
}

#[derive(Default)]
struct Tokenizer {
    tokens: Vec<Token>,
    acc: String,
}

impl Tokenizer {
    fn push_escaped(&mut self, c: char) {
        if c != QUOTE && c != ESCAPE {
            self.acc.push(ESCAPE);
        }
        self.acc.push(c);
    }

    /// Finish the accumulated token.
    ///
    /// Blank tokens are discarded. A `verbatim` (quoted) token is never an operator.
    fn flush(&mut self, verbatim: bool) {
        let text = std::mem::take(&mut self.acc);

        if text.trim().is_empty() {
            return;
        }

        let token = match Operator::from_keyword(&text) {
            Some(op) if !verbatim => Token::Op(op),
            _ => Token::Literal(text),
        };

        self.tokens.push(token);
    }
}
