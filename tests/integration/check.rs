use predicates::prelude::*;

use super::TestProject;

#[test]
fn test_check_well_formed_template() {
    let project = TestProject::new();
    project.write(
        "t.html",
        "{{title}}{{#each items}}{{items.name}}{{/each}}{{#if open}}o{{#else}}c{{/if}}",
    );

    project
        .uxr()
        .args(["check", "t.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t.html is well formed"))
        .stdout(predicate::str::contains("Variables: items.name, title"))
        .stdout(predicate::str::contains("Loops: items"))
        .stdout(predicate::str::contains("Conditions: open"))
        .stdout(predicate::str::contains("Max depth: 1"));
}

#[test]
fn test_check_unclosed_block_fails() {
    let project = TestProject::new();
    project.write("t.html", "line one\n  {{#each items}}x");

    project
        .uxr()
        .args(["check", "t.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template syntax error at 2:3"))
        .stderr(predicate::str::contains("unclosed {{#each items}}"));
}

#[test]
fn test_check_stray_close_fails() {
    let project = TestProject::new();
    project.write("t.html", "a{{/if}}");

    project
        .uxr()
        .args(["check", "t.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected {{/if}}"));
}

#[test]
fn test_check_reports_nesting_warnings() {
    let project = TestProject::new();
    project.write("t.html", "{{#each a}}{{#each b}}x{{/each}}{{/each}}");

    project
        .uxr()
        .args(["check", "t.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warnings:"))
        .stdout(predicate::str::contains("1:12"))
        .stdout(predicate::str::contains("will not be expanded"));
}

#[test]
fn test_check_strict_fails_on_warnings() {
    let project = TestProject::new();
    project.write("t.html", "{{#if a}}{{#if b}}x{{/if}}{{/if}}");

    project
        .uxr()
        .args(["check", "t.html", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 warning(s)"));
}

#[test]
fn test_check_json_output() {
    let project = TestProject::new();
    project.write("t.html", "{{x}}{{#if y}}{{/if}}");

    let output = project.uxr().args(["check", "t.html", "--json"]).output().unwrap();
    assert!(output.status.success());

    let outline: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outline["variables"], serde_json::json!(["x"]));
    assert_eq!(outline["conditions"], serde_json::json!(["y"]));
    assert_eq!(outline["warnings"], serde_json::json!([]));
}

#[test]
fn test_check_strict_accepts_top_level_condition_in_loop() {
    let project = TestProject::new();
    project.write("t.html", "{{#each xs}}{{#if show}}{{xs.name}}{{/if}}{{/each}}");

    project
        .uxr()
        .args(["check", "t.html", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warnings:").not());
}

#[test]
fn test_check_warns_when_condition_names_row_field() {
    let project = TestProject::new();
    project.write("t.html", "{{#each xs}}{{#if name}}{{xs.name}}{{/if}}{{/each}}");

    project
        .uxr()
        .args(["check", "t.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1:13"))
        .stdout(predicate::str::contains("not the loop row"));
}
