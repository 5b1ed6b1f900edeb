//! Boolean combinators.
//!
//! Expressions are reduced through a [Logic] implementation, which decides what an expression produces:
//! a `bool`, a rendered string, a database predicate and so on.
//! The engine only decides the structure: which values get combined, and in what order.

use std::marker::PhantomData;

/// AND/OR combinators over some output type.
///
/// Methods take `&mut self` so that backends can build up state (like a query builder) as they go.
pub trait Logic {
    type Output;

    /// Combine two values with AND. `lhs` is the operand that appeared first in the expression.
    fn and(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output;

    /// Combine two values with OR. `lhs` is the operand that appeared first in the expression.
    fn or(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output;
}

/// [Logic] extended with negation and boolean constants.
pub trait Negation: Logic {
    fn not(&mut self, value: Self::Output) -> Self::Output;

    /// The representation of the constant `true` or `false`.
    fn constant(&mut self, value: bool) -> Self::Output;
}

/// [Logic] built from two closures, see [fn_logic].
pub struct FnLogic<R, A, O> {
    and: A,
    or: O,
    _output: PhantomData<fn(R, R) -> R>,
}

/// Build a [Logic] from an `and` and an `or` closure.
pub fn fn_logic<R, A, O>(and: A, or: O) -> FnLogic<R, A, O>
where
    A: FnMut(R, R) -> R,
    O: FnMut(R, R) -> R,
{
    FnLogic {
        and,
        or,
        _output: PhantomData,
    }
}

impl<R, A, O> Logic for FnLogic<R, A, O>
where
    A: FnMut(R, R) -> R,
    O: FnMut(R, R) -> R,
{
    type Output = R;

    fn and(&mut self, lhs: R, rhs: R) -> R {
        (self.and)(lhs, rhs)
    }

    fn or(&mut self, lhs: R, rhs: R) -> R {
        (self.or)(lhs, rhs)
    }
}

/// [Negation] built from closures and two constant values, see [fn_negation].
pub struct FnNegation<R, A, O, N> {
    logic: FnLogic<R, A, O>,
    not: N,
    true_value: R,
    false_value: R,
}

/// Build a [Negation] from `and`, `or` and `not` closures and the values representing `true` and `false`.
pub fn fn_negation<R, A, O, N>(
    and: A,
    or: O,
    not: N,
    true_value: R,
    false_value: R,
) -> FnNegation<R, A, O, N>
where
    R: Clone,
    A: FnMut(R, R) -> R,
    O: FnMut(R, R) -> R,
    N: FnMut(R) -> R,
{
    FnNegation {
        logic: fn_logic(and, or),
        not,
        true_value,
        false_value,
    }
}

impl<R, A, O, N> Logic for FnNegation<R, A, O, N>
where
    A: FnMut(R, R) -> R,
    O: FnMut(R, R) -> R,
{
    type Output = R;

    fn and(&mut self, lhs: R, rhs: R) -> R {
        self.logic.and(lhs, rhs)
    }

    fn or(&mut self, lhs: R, rhs: R) -> R {
        self.logic.or(lhs, rhs)
    }
}

impl<R, A, O, N> Negation for FnNegation<R, A, O, N>
where
    R: Clone,
    A: FnMut(R, R) -> R,
    O: FnMut(R, R) -> R,
    N: FnMut(R) -> R,
{
    fn not(&mut self, value: R) -> R {
        (self.not)(value)
    }

    fn constant(&mut self, value: bool) -> R {
        if value {
            self.true_value.clone()
        } else {
            self.false_value.clone()
        }
    }
}

/// Plain boolean logic.
#[derive(Clone, Copy, Default, Debug)]
pub struct BoolLogic;

impl Logic for BoolLogic {
    type Output = bool;

    fn and(&mut self, lhs: bool, rhs: bool) -> bool {
        lhs && rhs
    }

    fn or(&mut self, lhs: bool, rhs: bool) -> bool {
        lhs || rhs
    }
}

impl Negation for BoolLogic {
    fn not(&mut self, value: bool) -> bool {
        !value
    }

    fn constant(&mut self, value: bool) -> bool {
        value
    }
}

/// Renders expressions as fully parenthesized infix strings, e.g. `(a AND (b OR NOT c))`.
#[derive(Clone, Copy, Default, Debug)]
pub struct Infix;

impl Logic for Infix {
    type Output = String;

    fn and(&mut self, lhs: String, rhs: String) -> String {
        format!("({lhs} AND {rhs})")
    }

    fn or(&mut self, lhs: String, rhs: String) -> String {
        format!("({lhs} OR {rhs})")
    }
}

impl Negation for Infix {
    /// Operands that are not a single word or a parenthesized group are wrapped, so that
    /// `NOT (group = 1)` is not read as `(NOT group) = 1`.
    fn not(&mut self, value: String) -> String {
        if value.contains(char::is_whitespace) && !is_parenthesized(&value) {
            format!("NOT ({value})")
        } else {
            format!("NOT {value}")
        }
    }

    fn constant(&mut self, value: bool) -> String {
        if value { "TRUE" } else { "FALSE" }.to_string()
    }
}

/// Whether the whole of `value` is enclosed in one pair of matching parentheses.
fn is_parenthesized(value: &str) -> bool {
    let Some(inner) = value.strip_prefix('(').and_then(|v| v.strip_suffix(')')) else {
        return false;
    };

    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                // the opening parenthesis closed before the end
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
