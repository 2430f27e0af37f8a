//! Edge cases: degenerate inputs, odd case names, odd source files

use light_report::reporter::{HtmlReporter, ReportMeta};
use light_report::snippet::{Snippet, SnippetResolver};
use light_report::{CaseResult, SuiteResult, Totals};
use std::fs;
use tempfile::TempDir;

fn meta() -> ReportMeta {
    ReportMeta {
        title: "t".into(),
        stylesheet_url: "s.css".into(),
        generated_at: "now".into(),
    }
}

#[test]
fn empty_suite_list_renders_complete_page() {
    let dir = TempDir::new().unwrap();
    let resolver = SnippetResolver::new(dir.path(), "cppm");
    let report = HtmlReporter::new(&resolver).report(&[], &meta()).unwrap();
    assert_eq!(report.totals, Totals::default());
    assert_eq!(report.totals.success_rate_label(), "0.0");
    assert!(report.html.starts_with("<!DOCTYPE html>"));
    assert!(report.html.contains("<script>"));
    assert!(report.html.trim_end().ends_with("</html>"));
}

#[test]
fn case_without_name_does_not_panic() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.cppm"), "bool ok() { return true; }").unwrap();
    let resolver = SnippetResolver::new(dir.path(), "cppm");
    let suite = SuiteResult {
        cases: Some(vec![CaseResult::default()]),
        ..SuiteResult::default()
    };
    let report = HtmlReporter::new(&resolver).report(&[suite], &meta()).unwrap();
    assert!(report.html.contains("class=\"test-case\""));
}

#[test]
fn repeated_case_names_are_each_resolved() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.cppm"), "bool same() { return 3; }").unwrap();
    let resolver = SnippetResolver::new(dir.path(), "cppm");
    let case = CaseResult {
        name: "same".into(),
        passed: true,
        ..CaseResult::default()
    };
    let suite = SuiteResult {
        cases: Some(vec![case.clone(), case]),
        ..SuiteResult::default()
    };
    let report = HtmlReporter::new(&resolver).report(&[suite], &meta()).unwrap();
    assert_eq!(report.html.matches("data-filename=\"a.cppm\"").count(), 2);
}

#[test]
fn declaration_without_body_is_skipped_to_definition() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.cppm"),
        "bool later();\n\nbool later() {\n  return true;\n}\n",
    )
    .unwrap();
    let resolver = SnippetResolver::new(dir.path(), "cppm");
    let Snippet::Found { body, .. } = resolver.find("later").unwrap() else {
        panic!("expected a match");
    };
    assert_eq!(body, "return true;");
}

#[test]
fn unicode_in_source_and_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.cppm"),
        "bool юникод() {\n  return s == \"héllo\";\n}\n",
    )
    .unwrap();
    let resolver = SnippetResolver::new(dir.path(), "cppm");
    let suite = SuiteResult {
        cases: Some(vec![CaseResult {
            name: "юникод".into(),
            error: "ошибка <x>".into(),
            ..CaseResult::default()
        }]),
        ..SuiteResult::default()
    };
    let report = HtmlReporter::new(&resolver).report(&[suite], &meta()).unwrap();
    assert!(report.html.contains("&quot;héllo&quot;"));
    assert!(report.html.contains("Error: ошибка &lt;x&gt;"));
    assert!(report.missing_snippets.is_empty());
}

#[test]
fn non_utf8_source_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.cppm"), [0xff, 0xfe, 0x00]).unwrap();
    let resolver = SnippetResolver::new(dir.path(), "cppm");
    let err = resolver.find("x").unwrap_err();
    assert!(matches!(err, light_report::ReportError::Io { .. }));
    assert_eq!(err.exit_code(), 6);
}
