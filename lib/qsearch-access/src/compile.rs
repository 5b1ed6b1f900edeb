use qsearch_query::Negation;

use crate::{
    cascade::Cascade,
    rule::{Access, PermissionRule},
};

/// Compile a [Cascade] into a single expression through `logic`.
///
/// `matches` produces the backend's representation of "the subject is covered by this rule's target".
/// Starting from the default, each non-empty level is OR-ed together and then applied:
/// a deny level as `acc AND NOT level`, an allow level as `acc OR level`.
pub fn compile_permissions<L, F>(cascade: &Cascade, logic: &mut L, mut matches: F) -> L::Output
where
    L: Negation,
    F: FnMut(&PermissionRule) -> L::Output,
{
    let mut acc = logic.constant(cascade.default_access().is_allow());

    for (_, access, rules) in cascade.levels() {
        let mut rules = rules.iter();
        let Some(first) = rules.next() else {
            continue;
        };

        let first = matches(first);
        let level_expr = rules.fold(first, |expr, rule| {
            let rule_expr = matches(rule);
            logic.or(expr, rule_expr)
        });

        acc = match access {
            Access::Deny => {
                let excluded = logic.not(level_expr);
                logic.and(acc, excluded)
            }
            Access::Allow => logic.or(acc, level_expr),
        };
    }

    acc
}

impl Cascade {
    /// See [compile_permissions].
    pub fn compile<L, F>(&self, logic: &mut L, matches: F) -> L::Output
    where
        L: Negation,
        F: FnMut(&PermissionRule) -> L::Output,
    {
        compile_permissions(self, logic, matches)
    }
}
