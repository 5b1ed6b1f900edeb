//! Grammar correction of token streams.
//!
//! Users type malformed queries all the time: `AND cats`, `cats OR`, `cats () dogs`, `cats (dogs`.
//! Instead of rejecting them, the token stream is repaired by looking at each pair of adjacent tokens
//! and applying a fixed correction whenever the pair is not allowed.
//! The output is always consumable by the postfix converter.

use tracing::debug;

use crate::token::{Operator, Token};

/// The class of a token, as seen by the adjacency rules.
///
/// `Start` and `End` are the edges of the stream, they never appear as tokens.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Class {
    Start,
    Literal,
    And,
    Or,
    GroupOpen,
    GroupClose,
    End,
}

impl Class {
    fn of(token: &Token) -> Self {
        match token {
            Token::Literal(_) => Self::Literal,
            Token::Op(Operator::And) => Self::And,
            Token::Op(Operator::Or) => Self::Or,
            Token::Op(Operator::GroupOpen) => Self::GroupOpen,
            Token::Op(Operator::GroupClose) => Self::GroupClose,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Correction {
    /// Insert an implicit `AND` between the two tokens
    InsertAnd,
    /// Remove the previous token, then check the new pair
    DropPrevious,
    /// Discard the next token
    DropNext,
    /// Remove the previous token and discard the next token
    DropBoth,
}

/// The adjacency table. `None` means the pair is allowed.
fn correction(last: Class, next: Class) -> Option<Correction> {
    use Class::*;

    match (last, next) {
        (Start, And | Or | GroupClose) => Some(Correction::DropNext),
        (Literal, Literal | GroupOpen) => Some(Correction::InsertAnd),
        (And | Or, And | Or | GroupClose | End) => Some(Correction::DropPrevious),
        (GroupOpen, And | Or) => Some(Correction::DropNext),
        (GroupOpen, GroupClose) => Some(Correction::DropBoth),
        (GroupOpen, End) => Some(Correction::DropPrevious),
        (GroupClose, GroupOpen | Literal) => Some(Correction::InsertAnd),
        _ => None,
    }
}

/// Rewrite a token stream so that it contains no illegal adjacent token pairs.
///
/// Leading operators, trailing operators, doubled operators and empty groups are removed,
/// an unterminated trailing `(` is dropped, and implicit `AND`s are inserted between
/// adjacent terms and groups. Never fails.
pub fn correct_grammar(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());

    for next in tokens.into_iter().map(Some).chain([None]) {
        push_corrected(&mut output, next);
    }

    output
}

/// Push one token (or the end of the stream, `None`) onto the corrected output.
///
/// `DropPrevious` is the only correction that loops. It only applies when the previous
/// token is an operator, so every iteration shrinks `output` and the loop ends at the latest
/// when `output` is empty (the `Start` edge is never dropped).
fn push_corrected(output: &mut Vec<Token>, next: Option<Token>) {
    let next_class = next.as_ref().map_or(Class::End, Class::of);

    loop {
        let last_class = output.last().map_or(Class::Start, Class::of);

        match correction(last_class, next_class) {
            None => {
                output.extend(next);
                return;
            }
            Some(Correction::InsertAnd) => {
                debug!(?last_class, ?next_class, "implicit AND");
                output.push(Token::Op(Operator::And));
                output.extend(next);
                return;
            }
            Some(Correction::DropPrevious) => {
                debug!(?last_class, ?next_class, "drop previous token");
                output.pop();
            }
            Some(Correction::DropNext) => {
                debug!(?last_class, ?next_class, "drop next token");
                return;
            }
            Some(Correction::DropBoth) => {
                debug!(?last_class, ?next_class, "drop both tokens");
                output.pop();
                return;
            }
        }
    }
}
