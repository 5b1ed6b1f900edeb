//! Rule sets as TOML documents.
//!
//! ```toml
//! default = "deny"
//!
//! [[rule]]
//! access = "allow"
//! scope = "identity"
//! target = 1
//!
//! [[rule]]
//! access = "deny"
//! scope = "group"
//! target = 1
//! parent-identity = 1
//! ```

use serde::Deserialize;

use crate::{
    cascade::{build_cascade, Cascade},
    error::{CascadeError, DocumentError},
    rule::{Access, PermissionRule, Scope},
};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    pub default: Access,

    #[serde(default)]
    pub rule: Vec<PermissionRule>,
}

impl RuleSet {
    pub fn from_toml(toml: &str) -> Result<Self, DocumentError> {
        let rule_set: Self = toml::from_str(toml)?;

        for rule in &rule_set.rule {
            validate_parents(rule)?;
        }

        Ok(rule_set)
    }

    pub fn build_cascade(&self) -> Result<Cascade, CascadeError> {
        build_cascade(self.default, self.rule.iter().cloned())
    }
}

/// Each rule must name exactly the parents its scope has.
fn validate_parents(rule: &PermissionRule) -> Result<(), DocumentError> {
    let (group_parent, identity_parent) = match rule.scope {
        Scope::Identity => (false, false),
        Scope::Group => (false, true),
        Scope::Resource => (true, true),
    };

    let has_group = rule.parent_group_id.is_some();
    let has_identity = rule.parent_identity_id.is_some();

    for (parent, expected, present) in [
        (Scope::Group, group_parent, has_group),
        (Scope::Identity, identity_parent, has_identity),
    ] {
        match (expected, present) {
            (true, false) => {
                return Err(DocumentError::MissingParent {
                    scope: rule.scope,
                    target_id: rule.target_id,
                    parent,
                })
            }
            (false, true) => {
                return Err(DocumentError::InvalidParent {
                    scope: rule.scope,
                    target_id: rule.target_id,
                    parent,
                })
            }
            _ => {}
        }
    }

    Ok(())
}
