//! The permission cascade.
//!
//! Rules are arranged into levels of alternating access, starting with the opposite of the default:
//!
//! ```text
//! default: deny
//! level 1: allow  (exceptions to the default)
//! level 2: deny   (exceptions to level 1)
//! level 3: allow  (exceptions to level 2)
//! ```
//!
//! A rule is placed at the first level where none of its hierarchy ancestors have been placed.
//! Rules that would not change the outcome at that level are redundant and get dropped.

use std::array;

use tracing::{debug, error, trace};

use crate::{
    error::CascadeError,
    rule::{Access, PermissionRule},
};

/// The number of cascade levels, one per hierarchy tier.
pub const LEVELS: usize = 3;

/// The access every rule at `level` (1-based) has, given the cascade's default.
pub fn expected_access(level: usize, default: Access) -> Access {
    if level % 2 == 1 {
        !default
    } else {
        default
    }
}

/// Rules arranged into exception levels over a default access.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cascade {
    default: Access,
    levels: [Vec<PermissionRule>; LEVELS],
}

impl Cascade {
    /// A cascade without any rules.
    pub fn new(default: Access) -> Self {
        Self {
            default,
            levels: array::from_fn(|_| vec![]),
        }
    }

    pub fn default_access(&self) -> Access {
        self.default
    }

    /// The rules at `level` (1-based). Levels outside the cascade are empty.
    pub fn level(&self, level: usize) -> &[PermissionRule] {
        level
            .checked_sub(1)
            .and_then(|index| self.levels.get(index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Each level (1-based) with its access and rules.
    pub fn levels(&self) -> impl Iterator<Item = (usize, Access, &[PermissionRule])> {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, rules)| {
                let level = index + 1;
                let access = expected_access(level, self.default);
                (level, access, rules.as_slice())
            })
    }

    /// Whether the cascade has no rules, so the default applies everywhere.
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Vec::is_empty)
    }

    /// The total number of placed rules.
    pub fn rule_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}

/// Arrange `rules` into a [Cascade].
///
/// Rules are considered in scope order, identities first, so the input order does not matter.
pub fn build_cascade(
    default: Access,
    rules: impl IntoIterator<Item = PermissionRule>,
) -> Result<Cascade, CascadeError> {
    let mut rules: Vec<_> = rules.into_iter().collect();
    rules.sort_by_key(|rule| rule.scope);

    let mut cascade = Cascade::new(default);

    for rule in rules {
        let Some(index) = cascade
            .levels
            .iter()
            .position(|level| !has_ancestor_in(&rule, level))
        else {
            error!(%rule, "rule does not fit into the cascade");
            return Err(CascadeError::InvariantViolation {
                scope: rule.scope,
                target_id: rule.target_id,
            });
        };

        let level = index + 1;
        if rule.access == expected_access(level, default) {
            trace!(%rule, level, "placed rule");
            cascade.levels[index].push(rule);
        } else {
            debug!(%rule, level, "dropped redundant rule");
        }
    }

    Ok(cascade)
}

fn has_ancestor_in(rule: &PermissionRule, level: &[PermissionRule]) -> bool {
    level.iter().any(|placed| placed.is_ancestor_of(rule))
}
