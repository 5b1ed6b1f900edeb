//! Matching queries against lines of text

use tracing::debug;

use crate::{
    error::EvalError,
    eval::evaluate,
    glob::GlobPattern,
    logic::BoolLogic,
    token::{Postfix, PostfixToken},
};

/// A query prepared for matching many lines of text.
///
/// Every literal must occur in the text (case-insensitively) to be true.
/// In wildcard mode literals are [GlobPattern]s.
#[derive(Clone, Debug)]
pub struct TextMatcher {
    postfix: Postfix,
    /// One pattern per literal, in expression order
    patterns: Vec<GlobPattern>,
}

impl TextMatcher {
    pub fn new(postfix: &[PostfixToken], wildcard: bool) -> Result<Self, EvalError> {
        // reject malformed expressions up front, so matching can't fail later
        evaluate(postfix, &mut BoolLogic, |_| true)?;

        let patterns = postfix
            .iter()
            .filter_map(|token| match token {
                PostfixToken::Literal(text) => Some(text),
                _ => None,
            })
            .map(|text| {
                if wildcard {
                    GlobPattern::new(text)
                } else {
                    GlobPattern::plain(text)
                }
            })
            .collect::<Vec<_>>();

        debug!(patterns = patterns.len(), wildcard, "prepared text matcher");

        Ok(Self {
            postfix: postfix.to_vec(),
            patterns,
        })
    }

    /// Whether `text` satisfies the query. The empty query matches everything.
    pub fn is_match(&self, text: &str) -> bool {
        // literals are visited exactly once each, in expression order
        let mut patterns = self.patterns.iter();
        let result = evaluate(&self.postfix, &mut BoolLogic, |_| {
            patterns
                .next()
                .is_some_and(|pattern| pattern.is_match(text))
        });

        matches!(result, Ok(Some(true)) | Ok(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn matcher(query: &str, wildcard: bool) -> TextMatcher {
        TextMatcher::new(&parse(query), wildcard).unwrap()
    }

    #[test]
    fn implicit_and() {
        let m = matcher("quassel core", false);
        assert!(m.is_match("the Quassel core crashed"));
        assert!(m.is_match("CORE of quassel"));
        assert!(!m.is_match("quassel client"));
    }

    #[test]
    fn or_and_grouping() {
        let m = matcher("(cat OR dog) AND food", false);
        assert!(m.is_match("cat food"));
        assert!(m.is_match("dog food"));
        assert!(!m.is_match("fish food"));
        assert!(!m.is_match("cat dog"));
    }

    #[test]
    fn quoted_phrase() {
        let m = matcher("\"melancholy OR tremors\"", false);
        assert!(m.is_match("symptoms: melancholy or tremors"));
        assert!(!m.is_match("melancholy"));
    }

    #[test]
    fn wildcard_mode() {
        let m = matcher("net*split", true);
        assert!(m.is_match("*** netsplit detected"));
        assert!(m.is_match("network split"));

        let m = matcher("net*split", false);
        assert!(!m.is_match("netsplit"));
        assert!(m.is_match("net*split"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let m = matcher("  AND ( ) ", false);
        assert!(m.is_match("anything"));
        assert!(m.is_match(""));
    }

    #[test]
    fn malformed_postfix_is_rejected() {
        let result = TextMatcher::new(&[PostfixToken::literal("a"), PostfixToken::And], false);
        assert!(matches!(
            result,
            Err(EvalError::InsufficientOperands { position: 1 })
        ));
    }
}
