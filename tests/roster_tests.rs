use std::fs;
use synapse::consts::DEFAULT_EMAIL_PATTERN;
use synapse::roster::{compile_pattern, filter_emails, load_roster};
use synapse::SynapseError;

#[test]
fn test_filter_emails() {
    let pattern = compile_pattern(DEFAULT_EMAIL_PATTERN).unwrap();
    let raw = [
        "not-email",
        "",
        "a@example.com",
        "a@example.com",
        "a+34@example.com",
        "in@valid.net",
    ];

    assert_eq!(
        filter_emails(raw, &pattern),
        vec!["a@example.com", "a+34@example.com"]
    );
}

#[test]
fn test_custom_domains() {
    let pattern = compile_pattern(r"^[^@\s]+@(example\.com|valid\.net)$").unwrap();
    let raw = ["in@valid.net", "x@example.com", "y@other.org", "in@valid.net"];
    assert_eq!(
        filter_emails(raw, &pattern),
        vec!["in@valid.net", "x@example.com"]
    );
}

#[test]
fn test_load_roster_keeps_first_seen_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "name,email,team\n\
         Zed,zed@example.com,ops\n\
         Ada,ada@example.com,eng\n\
         Zed again,zed@example.com,ops\n\
         Outsider,someone@gmail.com,none\n\
         Short row\n\
         Bob, bob@example.com ,eng\n",
    )
    .unwrap();

    let pattern = compile_pattern(DEFAULT_EMAIL_PATTERN).unwrap();
    let ids = load_roster(&path, "Email", &pattern).unwrap();
    assert_eq!(ids, vec!["zed@example.com", "ada@example.com", "bob@example.com"]);
}

#[test]
fn test_missing_roster_fails_fast() {
    let pattern = compile_pattern(DEFAULT_EMAIL_PATTERN).unwrap();
    let err = load_roster("/definitely/not/here.csv", "email", &pattern).unwrap_err();
    assert!(matches!(err, SynapseError::Config(_)));
}
