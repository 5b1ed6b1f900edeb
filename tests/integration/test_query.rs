use indoc::indoc;
use qsearch::{describe_query, parse_query, search, EnvConfig};
use test_log::test;

use crate::{config, output};

const LOG: &str = indoc! {"
    [12:01] <alice> the quassel core crashed again
    [12:02] <bob> which core version?
    [12:03] <alice> 0.14, with the sqlite backend
    [12:04] <carol> Postgres works fine here
    [12:05] <bob> try the postgres backend then
    [12:06] <alice> will do, thanks
"};

fn search_log(query: &str, wildcard: bool) -> String {
    let query = parse_query(query, &config()).unwrap();
    output(|out| {
        search(&query, LOG.as_bytes(), wildcard, out)?;
        Ok(())
    })
}

#[test]
fn test_describe_query() {
    let query = parse_query("OR quassel (core OR client) AND", &config()).unwrap();

    assert_eq!(
        indoc! {"
            tokens:  quassel AND ( core OR client )
            postfix: quassel core client OR AND
            infix:   (quassel AND (core OR client))
        "},
        output(|out| describe_query(&query, out))
    );
}

#[test]
fn test_describe_empty_query() {
    let query = parse_query("( )", &config()).unwrap();

    assert_eq!(
        "tokens:  \npostfix: \ninfix:   \n",
        output(|out| describe_query(&query, out))
    );
}

#[test]
fn test_query_length_limit() {
    let config = EnvConfig {
        max_query_len: 8,
        ..EnvConfig::default()
    };

    assert!(parse_query("12345678", &config).is_ok());
    let err = parse_query("123456789", &config).unwrap_err();
    assert_eq!("query is 9 bytes long, the limit is 8", err.to_string());
}

#[test]
fn test_search_implicit_and() {
    assert_eq!(
        indoc! {"
            [12:01] <alice> the quassel core crashed again
        "},
        search_log("alice core", false)
    );
}

#[test]
fn test_search_or_with_groups() {
    assert_eq!(
        indoc! {"
            [12:03] <alice> 0.14, with the sqlite backend
            [12:04] <carol> Postgres works fine here
            [12:05] <bob> try the postgres backend then
        "},
        search_log("sqlite OR (postgres AND (fine OR backend))", false)
    );
}

#[test]
fn test_search_quoted_phrase() {
    assert_eq!(
        indoc! {"
            [12:05] <bob> try the postgres backend then
        "},
        search_log("\"postgres backend\"", false)
    );
}

#[test]
fn test_search_wildcards() {
    assert_eq!(
        indoc! {"
            [12:01] <alice> the quassel core crashed again
            [12:02] <bob> which core version?
        "},
        search_log("c?re", true)
    );

    // without wildcard mode, `?` is matched literally
    assert_eq!(
        indoc! {"
            [12:02] <bob> which core version?
        "},
        search_log("version?", false)
    );
    assert_eq!("", search_log("c?re", false));
}

#[test]
fn test_search_empty_query_matches_everything() {
    assert_eq!(LOG, search_log("", false));
}

#[test]
fn test_search_counts_matches() {
    let query = parse_query("alice", &config()).unwrap();
    let mut out = vec![];
    assert_eq!(3, search(&query, LOG.as_bytes(), false, &mut out).unwrap());
}
