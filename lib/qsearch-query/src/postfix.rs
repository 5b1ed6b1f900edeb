//! Infix to postfix conversion (shunting-yard)

use tracing::warn;

use crate::token::{Operator, Postfix, PostfixToken, QueryText, Token};

/// An entry of the operator stack
#[derive(Clone, Copy, PartialEq, Eq)]
enum Stacked {
    And,
    Or,
    GroupOpen,
}

impl Stacked {
    /// Binding strength of a binary operator. Both operators are left-associative.
    const fn precedence(self) -> u8 {
        match self {
            Self::And => 2,
            Self::Or => 1,
            Self::GroupOpen => 0,
        }
    }
}

/// Convert a (grammar corrected) token stream to postfix form.
///
/// Mismatched parentheses are not errors: an unmatched `)` closes a group implicitly opened at
/// the start of the input, and an unmatched `(` is implicitly closed at the end of the input.
/// Both cases are reported as warnings.
pub fn to_postfix(tokens: &[Token]) -> Postfix {
    let mut output = Postfix::with_capacity(tokens.len());
    let mut stack: Vec<Stacked> = vec![];

    for token in tokens {
        let op = match token {
            Token::Literal(text) => {
                output.push(PostfixToken::Literal(text.clone()));
                continue;
            }
            Token::Op(Operator::GroupOpen) => {
                stack.push(Stacked::GroupOpen);
                continue;
            }
            Token::Op(Operator::GroupClose) => {
                if !close_group(&mut stack, &mut output) {
                    warn!(query = %QueryText(tokens), "unmatched ')' in query");
                }
                continue;
            }
            Token::Op(Operator::And) => Stacked::And,
            Token::Op(Operator::Or) => Stacked::Or,
        };

        while let Some(&top) = stack.last() {
            if top == Stacked::GroupOpen || top.precedence() < op.precedence() {
                break;
            }
            stack.pop();
            emit(top, &mut output);
        }
        stack.push(op);
    }

    while let Some(top) = stack.pop() {
        if top == Stacked::GroupOpen {
            warn!(query = %QueryText(tokens), "unmatched '(' in query");
        } else {
            emit(top, &mut output);
        }
    }

    output
}

/// Pop operators until the innermost `(`. Returns false if there was none.
fn close_group(stack: &mut Vec<Stacked>, output: &mut Postfix) -> bool {
    loop {
        match stack.pop() {
            Some(Stacked::GroupOpen) => return true,
            Some(top) => emit(top, output),
            None => return false,
        }
    }
}

fn emit(op: Stacked, output: &mut Postfix) {
    match op {
        Stacked::And => output.push(PostfixToken::And),
        Stacked::Or => output.push(PostfixToken::Or),
        Stacked::GroupOpen => {}
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use test_log::test;

    use super::*;

    fn lit(text: &str) -> Token {
        Token::literal(text)
    }

    fn plit(text: &str) -> PostfixToken {
        PostfixToken::literal(text)
    }

    const AND: Token = Token::Op(Operator::And);
    const OR: Token = Token::Op(Operator::Or);
    const OPEN: Token = Token::Op(Operator::GroupOpen);
    const CLOSE: Token = Token::Op(Operator::GroupClose);

    const P_AND: PostfixToken = PostfixToken::And;
    const P_OR: PostfixToken = PostfixToken::Or;

    /// Collects formatted log output
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn logged_while(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(
            vec![plit("w1"), plit("w2"), plit("w3"), P_AND, P_OR],
            to_postfix(&[lit("w1"), OR, lit("w2"), AND, lit("w3")])
        );
        assert_eq!(
            vec![plit("w1"), plit("w2"), P_AND, plit("w3"), P_OR],
            to_postfix(&[lit("w1"), AND, lit("w2"), OR, lit("w3")])
        );
    }

    #[test]
    fn left_associative() {
        assert_eq!(
            vec![plit("a"), plit("b"), P_OR, plit("c"), P_OR],
            to_postfix(&[lit("a"), OR, lit("b"), OR, lit("c")])
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(
            vec![plit("w1"), plit("w2"), plit("w3"), P_OR, P_AND],
            to_postfix(&[lit("w1"), AND, OPEN, lit("w2"), OR, lit("w3"), CLOSE])
        );
    }

    #[test]
    fn unmatched_close_paren() {
        assert_eq!(
            vec![plit("a"), plit("b"), P_OR, plit("c"), P_AND],
            to_postfix(&[lit("a"), OR, lit("b"), CLOSE, AND, lit("c")])
        );
    }

    #[test]
    fn unmatched_open_paren() {
        assert_eq!(
            vec![plit("a"), plit("b"), plit("c"), P_OR, P_AND],
            to_postfix(&[lit("a"), AND, OPEN, lit("b"), OR, lit("c")])
        );
    }

    #[test]
    fn mismatch_warnings_carry_the_query() {
        let log = logged_while(|| {
            to_postfix(&[lit("a"), OR, lit("b"), CLOSE, AND, lit("c")]);
        });
        assert!(log.contains("WARN"), "{log}");
        assert!(log.contains("unmatched ')' in query"), "{log}");
        assert!(log.contains("query=a OR b ) AND c"), "{log}");

        let log = logged_while(|| {
            to_postfix(&[lit("a"), AND, OPEN, lit("two words")]);
        });
        assert!(log.contains("unmatched '(' in query"), "{log}");
        assert!(log.contains(r#"query=a AND ( "two words""#), "{log}");
    }

    #[test]
    fn balanced_query_does_not_warn() {
        let log = logged_while(|| {
            to_postfix(&[OPEN, lit("a"), OR, lit("b"), CLOSE, AND, lit("c")]);
        });
        assert!(!log.contains("WARN"), "{log}");
    }

    #[test]
    fn empty() {
        assert!(to_postfix(&[]).is_empty());
    }
}
