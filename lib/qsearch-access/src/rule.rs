use std::{fmt, ops::Not};

use int_enum::IntEnum;
use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// The access granted by a rule or by default.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, IntEnum, Deserialize, Serialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Deny = 0,
    Allow = 1,
}

impl Access {
    /// Convert a stored access value.
    pub fn from_raw(raw: u8) -> Result<Self, AccessError> {
        Self::try_from(raw).map_err(|_| AccessError::UnknownAccess(raw))
    }

    pub const fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "deny",
            Self::Allow => "allow",
        }
    }
}

impl Not for Access {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Deny => Self::Allow,
            Self::Allow => Self::Deny,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tier of the containment hierarchy a rule applies to.
///
/// `Identity` contains `Group`s, which contain `Resource`s.
/// In the IRC log search this is quassel user, network and channel buffer.
#[repr(u8)]
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntEnum, Deserialize, Serialize, Debug,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Identity = 0,
    Group = 1,
    Resource = 2,
}

impl Scope {
    /// Convert a stored scope value.
    pub fn from_raw(raw: u8) -> Result<Self, AccessError> {
        Self::try_from(raw).map_err(|_| AccessError::UnknownScope(raw))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Group => "group",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An allow or deny rule for one target in the hierarchy.
///
/// The parent ids are denormalized by the data layer. They are used to find the rule's
/// ancestors, and are expected to be `None` where the scope has no such parent.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PermissionRule {
    pub access: Access,
    pub scope: Scope,
    #[serde(rename = "target")]
    pub target_id: i64,
    #[serde(default, rename = "parent-group")]
    pub parent_group_id: Option<i64>,
    #[serde(default, rename = "parent-identity")]
    pub parent_identity_id: Option<i64>,
}

impl PermissionRule {
    pub fn identity(access: Access, identity_id: i64) -> Self {
        Self {
            access,
            scope: Scope::Identity,
            target_id: identity_id,
            parent_group_id: None,
            parent_identity_id: None,
        }
    }

    pub fn group(access: Access, group_id: i64, identity_id: i64) -> Self {
        Self {
            access,
            scope: Scope::Group,
            target_id: group_id,
            parent_group_id: None,
            parent_identity_id: Some(identity_id),
        }
    }

    pub fn resource(access: Access, resource_id: i64, group_id: i64, identity_id: i64) -> Self {
        Self {
            access,
            scope: Scope::Resource,
            target_id: resource_id,
            parent_group_id: Some(group_id),
            parent_identity_id: Some(identity_id),
        }
    }

    /// The `(scope, id)` of every hierarchy ancestor of this rule's target, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = (Scope, i64)> {
        let (group, identity) = match self.scope {
            Scope::Identity => (None, None),
            Scope::Group => (None, self.parent_identity_id),
            Scope::Resource => (self.parent_group_id, self.parent_identity_id),
        };

        group
            .map(|id| (Scope::Group, id))
            .into_iter()
            .chain(identity.map(|id| (Scope::Identity, id)))
    }

    /// Whether this rule targets `scope`/`id`.
    pub fn targets(&self, scope: Scope, id: i64) -> bool {
        self.scope == scope && self.target_id == id
    }

    /// Whether this rule's target contains the target of `rule`.
    pub fn is_ancestor_of(&self, rule: &PermissionRule) -> bool {
        rule.ancestors().any(|(scope, id)| self.targets(scope, id))
    }
}

impl fmt::Display for PermissionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.access, self.scope, self.target_id)
    }
}
