//! Integration tests for the template fetch stage (mocked HTTP)

use std::fs;

use formpipe_core::catalog::LanguageEntry;
use formpipe_remote::fetch_templates;

fn entry(lang: &str, lang_name: &str, source_link: Option<String>) -> LanguageEntry {
    LanguageEntry {
        lang: lang.to_string(),
        lang_name: lang_name.to_string(),
        source_link,
    }
}

#[test]
fn test_fetch_writes_template_keyed_by_language_code() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/document/d/abc/export?format=md")
        .with_status(200)
        .with_body("# Consent\n\n{{CHILD_NAME}}\n")
        .create();

    let temp = tempfile::tempdir().unwrap();
    let entries = vec![entry(
        "hi",
        "Hindi",
        Some(format!("{}/document/d/abc/edit", server.url())),
    )];

    let summary = fetch_templates(&entries, temp.path(), false).unwrap();

    mock.assert();
    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.total, 1);

    let content = fs::read_to_string(temp.path().join("hi.md")).unwrap();
    assert!(content.contains("{{CHILD_NAME}}"));
}

#[test]
fn test_entry_without_source_link_makes_no_request() {
    let temp = tempfile::tempdir().unwrap();
    let entries = vec![
        entry("ta", "Tamil", None),
        entry("te", "Telugu", Some(String::new())),
    ];

    let summary = fetch_templates(&entries, temp.path(), false).unwrap();

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.fetched, 0);
    // No output files for skipped languages
    assert!(!temp.path().join("ta.md").exists());
    assert!(!temp.path().join("te.md").exists());
}

#[test]
fn test_failed_entry_does_not_abort_the_batch() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/bad/export?format=md")
        .with_status(404)
        .create();
    server
        .mock("GET", "/good/export?format=md")
        .with_status(200)
        .with_body("body")
        .create();

    let temp = tempfile::tempdir().unwrap();
    let entries = vec![
        entry("kn", "Kannada", Some(format!("{}/bad/edit", server.url()))),
        entry("ml", "Malayalam", Some(format!("{}/good/edit", server.url()))),
    ];

    let summary = fetch_templates(&entries, temp.path(), false).unwrap();

    assert_eq!(summary.errored, 1);
    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.total, 2);
    assert!(!temp.path().join("kn.md").exists());
    assert!(temp.path().join("ml.md").exists());
}

#[test]
fn test_refetch_overwrites_existing_template() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/doc/export?format=md")
        .with_status(200)
        .with_body("new body")
        .create();

    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("en.md"), "old body").unwrap();

    let entries = vec![entry(
        "en",
        "English",
        Some(format!("{}/doc/edit", server.url())),
    )];
    fetch_templates(&entries, temp.path(), false).unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("en.md")).unwrap(),
        "new body"
    );
}
