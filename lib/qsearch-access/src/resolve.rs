use std::{fmt, str::FromStr};

use qsearch_query::BoolLogic;

use crate::{
    cascade::Cascade,
    compile::compile_permissions,
    error::InvalidPath,
    rule::{PermissionRule, Scope},
};

/// A concrete resource in the identity/group/resource hierarchy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ResourcePath {
    pub identity_id: i64,
    pub group_id: i64,
    pub resource_id: i64,
}

impl ResourcePath {
    pub fn new(identity_id: i64, group_id: i64, resource_id: i64) -> Self {
        Self {
            identity_id,
            group_id,
            resource_id,
        }
    }

    /// The path's id at `scope`.
    pub fn id_at(&self, scope: Scope) -> i64 {
        match scope {
            Scope::Identity => self.identity_id,
            Scope::Group => self.group_id,
            Scope::Resource => self.resource_id,
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.identity_id, self.group_id, self.resource_id
        )
    }
}

/// Parses `IDENTITY/GROUP/RESOURCE`
impl FromStr for ResourcePath {
    type Err = InvalidPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = s
            .split('/')
            .map(|segment| segment.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| InvalidPath)?;

        let [identity_id, group_id, resource_id] = ids[..] else {
            return Err(InvalidPath);
        };
        Ok(Self::new(identity_id, group_id, resource_id))
    }
}

impl PermissionRule {
    /// Whether this rule's target contains (or is) the resource at `path`.
    pub fn covers(&self, path: &ResourcePath) -> bool {
        self.target_id == path.id_at(self.scope)
    }
}

impl Cascade {
    /// Resolve whether the resource at `path` is accessible.
    pub fn is_allowed(&self, path: &ResourcePath) -> bool {
        compile_permissions(self, &mut BoolLogic, |rule| rule.covers(path))
    }
}
