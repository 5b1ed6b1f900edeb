use thiserror::Error;

use crate::rule::Scope;

/// Errors converting stored integers into rule fields.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum AccessError {
    #[error("unknown access value: {0}")]
    UnknownAccess(u8),

    #[error("unknown scope value: {0}")]
    UnknownScope(u8),
}

#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
#[error("invalid resource path, expected IDENTITY/GROUP/RESOURCE")]
pub struct InvalidPath;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum CascadeError {
    /// A rule could not be placed at any cascade level.
    ///
    /// This means the rule data describes a deeper hierarchy than the cascade supports.
    #[error("{scope} rule for {target_id} does not fit into any cascade level")]
    InvariantViolation { scope: Scope, target_id: i64 },
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("rule set parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{scope} rule for {target_id} cannot have a parent {parent}")]
    InvalidParent {
        scope: Scope,
        target_id: i64,
        parent: Scope,
    },

    #[error("{scope} rule for {target_id} is missing its parent {parent}")]
    MissingParent {
        scope: Scope,
        target_id: i64,
        parent: Scope,
    },

    #[error(transparent)]
    Cascade(#[from] CascadeError),
}
