use std::io::Write;

use indoc::indoc;
use qsearch::{describe_permissions, load_rule_set, permission_expression};
use qsearch_access::{ResourcePath, RuleSet};
use test_log::test;

use crate::output;

const RULES: &str = indoc! {r#"
    default = "deny"

    [[rule]]
    access = "allow"
    scope = "identity"
    target = 1

    [[rule]]
    access = "deny"
    scope = "group"
    target = 1
    parent-identity = 1

    [[rule]]
    access = "allow"
    scope = "resource"
    target = 1
    parent-group = 1
    parent-identity = 1

    # redundant, the group is already allowed through its identity
    [[rule]]
    access = "allow"
    scope = "group"
    target = 2
    parent-identity = 1

    [[rule]]
    access = "allow"
    scope = "resource"
    target = 9
    parent-group = 5
    parent-identity = 4
"#};

fn describe(check: Option<&str>) -> String {
    let rule_set = RuleSet::from_toml(RULES).unwrap();
    let check: Option<ResourcePath> = check.map(|path| path.parse().unwrap());
    output(|out| describe_permissions(&rule_set, check.as_ref(), out))
}

#[test]
fn test_describe_permissions() {
    assert_eq!(
        indoc! {"
            default: deny
            level 1 (allow): identity 1, resource 9
            level 2 (deny): group 1
            level 3 (allow): resource 1
            expression: (((FALSE OR (identity = 1 OR resource = 9)) AND NOT (group = 1)) OR resource = 1)
        "},
        describe(None)
    );
}

#[test]
fn test_check_resource() {
    assert!(describe(Some("1/1/1")).ends_with("1/1/1: allowed\n"));
    assert!(describe(Some("1/1/2")).ends_with("1/1/2: denied\n"));
    assert!(describe(Some("1/2/3")).ends_with("1/2/3: allowed\n"));
    assert!(describe(Some("4/5/9")).ends_with("4/5/9: allowed\n"));
    assert!(describe(Some("4/5/8")).ends_with("4/5/8: denied\n"));
}

#[test]
fn test_empty_rule_set() {
    let rule_set = RuleSet::from_toml("default = \"allow\"").unwrap();
    let cascade = rule_set.build_cascade().unwrap();

    assert_eq!("TRUE", permission_expression(&cascade));

    let path = ResourcePath::new(3, 2, 1);
    assert_eq!(
        "default: allow\nexpression: TRUE\n3/2/1: allowed\n",
        output(|out| describe_permissions(&rule_set, Some(&path), out))
    );
}

#[test]
fn test_load_rule_set() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RULES.as_bytes()).unwrap();

    let rule_set = load_rule_set(file.path()).unwrap();
    assert_eq!(5, rule_set.rule.len());
}

#[test]
fn test_load_invalid_rule_set() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"default = \"deny\"\nunknown = 1\n").unwrap();

    let err = load_rule_set(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("invalid rule set"));

    let err = load_rule_set(&file.path().with_extension("missing")).unwrap_err();
    assert!(err.to_string().starts_with("unable to read rule set"));
}
