//! Hierarchical allow/deny permissions.
//!
//! Rules target an identity, a group within an identity, or a resource within a group.
//! They are arranged into a [Cascade] of alternating exception levels, which compiles into a single
//! boolean expression through any [Negation](qsearch_query::Negation) backend: evaluated directly for one
//! resource with [Cascade::is_allowed], or rendered as a filter expression for a storage query.

pub mod cascade;
pub mod compile;
pub mod document;
pub mod error;
pub mod resolve;
pub mod rule;

pub use cascade::{build_cascade, expected_access, Cascade};
pub use compile::compile_permissions;
pub use document::RuleSet;
pub use error::{AccessError, CascadeError, DocumentError, InvalidPath};
pub use resolve::ResourcePath;
pub use rule::{Access, PermissionRule, Scope};
