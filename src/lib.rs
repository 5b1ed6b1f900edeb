use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};

use anyhow::{bail, Context};
use itertools::Itertools;
use qsearch_access::{Cascade, PermissionRule, ResourcePath, RuleSet};
use qsearch_query::{BooleanQuery, Infix};
use tracing::{debug, info};

pub use env_config::EnvConfig;

pub mod env_config;

/// Parse a user query, enforcing the configured length limit.
pub fn parse_query(query: &str, config: &EnvConfig) -> anyhow::Result<BooleanQuery> {
    if query.len() > config.max_query_len {
        bail!(
            "query is {} bytes long, the limit is {}",
            query.len(),
            config.max_query_len
        );
    }

    Ok(BooleanQuery::parse(query))
}

/// Print the corrected tokens, the postfix form and the infix rendering of a query.
pub fn describe_query(query: &BooleanQuery, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "tokens:  {}", query.tokens().iter().join(" "))?;
    writeln!(out, "postfix: {}", query.postfix().iter().join(" "))?;
    writeln!(out, "infix:   {}", query.to_infix()?)?;
    Ok(())
}

/// Copy the lines of `input` matching `query` to `out`, returning the number of matching lines.
pub fn search(
    query: &BooleanQuery,
    input: impl BufRead,
    wildcard: bool,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let matcher = query.matcher(wildcard)?;
    let mut matched = 0;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if matcher.is_match(&line) {
            writeln!(out, "{line}")?;
            matched += 1;
        }
    }

    info!(matched, query = query.source(), "search finished");

    Ok(matched)
}

pub fn load_rule_set(path: &Path) -> anyhow::Result<RuleSet> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("unable to read rule set {}", path.display()))?;

    let rule_set = RuleSet::from_toml(&source)
        .with_context(|| format!("invalid rule set {}", path.display()))?;

    debug!(rules = rule_set.rule.len(), path = %path.display(), "loaded rule set");

    Ok(rule_set)
}

/// Print the cascade built from `rule_set` and its compiled expression,
/// optionally resolving access to one resource.
pub fn describe_permissions(
    rule_set: &RuleSet,
    check: Option<&ResourcePath>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let cascade = rule_set.build_cascade()?;

    writeln!(out, "default: {}", cascade.default_access())?;
    for (level, access, rules) in cascade.levels() {
        if rules.is_empty() {
            continue;
        }

        let targets = rules
            .iter()
            .map(|rule| format!("{} {}", rule.scope, rule.target_id))
            .join(", ");
        writeln!(out, "level {level} ({access}): {targets}")?;
    }
    writeln!(out, "expression: {}", permission_expression(&cascade))?;

    if let Some(path) = check {
        let verdict = if cascade.is_allowed(path) {
            "allowed"
        } else {
            "denied"
        };
        writeln!(out, "{path}: {verdict}")?;
    }

    Ok(())
}

/// Render a cascade as an infix filter expression over `scope = id` terms.
pub fn permission_expression(cascade: &Cascade) -> String {
    let term = |rule: &PermissionRule| format!("{} = {}", rule.scope, rule.target_id);
    cascade.compile(&mut Infix, term)
}
