//! Postfix evaluation

use crate::{error::EvalError, logic::Logic, token::PostfixToken};

/// Reduce a postfix expression to a single value.
///
/// Literals are passed through `operand` and pushed on a stack. An operator pops two values
/// and pushes the result of combining them through `logic`. The value popped first (the most
/// recently pushed) is the right-hand operand, so `a b AND` calls `logic.and(a, b)`.
///
/// Every callback is called exactly once per literal or operator, strictly left to right.
///
/// Returns `Ok(None)` for an empty expression.
pub fn evaluate<L, F>(
    postfix: &[PostfixToken],
    logic: &mut L,
    mut operand: F,
) -> Result<Option<L::Output>, EvalError>
where
    L: Logic,
    F: FnMut(&str) -> L::Output,
{
    let mut stack: Vec<L::Output> = Vec::with_capacity(postfix.len() / 2 + 1);

    for (position, token) in postfix.iter().enumerate() {
        match token {
            PostfixToken::Literal(text) => stack.push(operand(text)),
            PostfixToken::And | PostfixToken::Or => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(EvalError::InsufficientOperands { position });
                };

                stack.push(match token {
                    PostfixToken::And => logic.and(lhs, rhs),
                    _ => logic.or(lhs, rhs),
                });
            }
        }
    }

    let result = stack.pop();
    if !stack.is_empty() {
        return Err(EvalError::OrphanedOperands {
            count: stack.len() + 1,
        });
    }

    Ok(result)
}

/// [evaluate] with the literals themselves as operands.
pub fn evaluate_literals<L>(
    postfix: &[PostfixToken],
    logic: &mut L,
) -> Result<Option<L::Output>, EvalError>
where
    L: Logic,
    L::Output: From<String>,
{
    evaluate(postfix, logic, |text| L::Output::from(text.to_string()))
}
