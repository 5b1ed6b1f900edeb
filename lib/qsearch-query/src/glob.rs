//! Glob-style search patterns.
//!
//! In wildcard mode, `*` matches any run of characters and `?` matches a single character.
//! A backslash escapes the next character. Matching is case-insensitive and unanchored,
//! a pattern matches if it occurs anywhere in the text.

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// A compiled search pattern for one query literal.
#[derive(Clone, Debug)]
pub struct GlobPattern {
    matcher: Matcher,
    has_wildcards: bool,
}

#[derive(Clone, Debug)]
enum Matcher {
    /// Lowercased text to find
    Substring(String),
    Regex(Regex),
}

impl GlobPattern {
    /// Compile a glob pattern.
    ///
    /// Patterns without wildcards are plain substring searches.
    pub fn new(pattern: &str) -> Self {
        let mut source = String::with_capacity(pattern.len() * 2);
        let mut text = String::with_capacity(pattern.len());
        let mut has_wildcards = false;
        let mut escaped = false;

        for c in pattern.chars() {
            if escaped {
                escaped = false;
                push_literal(&mut source, &mut text, c);
                continue;
            }

            match c {
                '\\' => escaped = true,
                '*' => {
                    has_wildcards = true;
                    source.push_str(".*");
                }
                '?' => {
                    has_wildcards = true;
                    source.push('.');
                }
                c => push_literal(&mut source, &mut text, c),
            }
        }

        // hanging backslash
        if escaped {
            push_literal(&mut source, &mut text, '\\');
        }

        if !has_wildcards {
            return Self::plain(&text);
        }

        // Every regex metacharacter in `source` is escaped, so the only possible failure is
        // the compiled program outgrowing the size limit, which is lifted.
        match RegexBuilder::new(&source)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .size_limit(usize::MAX)
            .build()
        {
            Ok(regex) => Self {
                matcher: Matcher::Regex(regex),
                has_wildcards,
            },
            Err(err) => {
                warn!(%err, "unable to compile wildcard pattern, matching it as plain text");
                Self::plain(&text)
            }
        }
    }

    /// A pattern matching `text` literally, without any special characters.
    pub fn plain(text: &str) -> Self {
        Self {
            matcher: Matcher::Substring(text.to_lowercase()),
            has_wildcards: false,
        }
    }

    /// Whether the pattern contained an unescaped `*` or `?`.
    pub fn has_wildcards(&self) -> bool {
        self.has_wildcards
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Substring(needle) => text.to_lowercase().contains(needle.as_str()),
            Matcher::Regex(regex) => regex.is_match(text),
        }
    }
}

fn push_literal(source: &mut String, text: &mut String, c: char) {
    let mut buf = [0; 4];
    source.push_str(&regex::escape(c.encode_utf8(&mut buf)));
    text.push(c);
}
