use predicates::prelude::*;

use super::TestProject;

#[test]
fn test_render_with_json_data() {
    let project = TestProject::new();
    project.write("card.html", "<h1>{{title}}</h1>{{#if featured}}<b>!</b>{{/if}}");
    project.write("card.json", r#"{"title": "Hello", "featured": true}"#);

    project
        .uxr()
        .args(["render", "card.html", "--data", "card.json"])
        .assert()
        .success()
        .stdout("<h1>Hello</h1><b>!</b>");
}

#[test]
fn test_render_with_yaml_loop() {
    let project = TestProject::new();
    project.write("list.html", "<ul>{{#each items}}<li>{{items.name}}</li>{{/each}}</ul>");
    project.write("list.yaml", "items:\n  - name: one\n  - name: two\n");

    project
        .uxr()
        .args(["render", "list.html", "-d", "list.yaml"])
        .assert()
        .success()
        .stdout("<ul><li>one</li><li>two</li></ul>");
}

#[test]
fn test_render_with_toml_data() {
    let project = TestProject::new();
    project.write("t.txt", "{{name}} has {{#if count > 3}}many{{#else}}few{{/if}}");
    project.write("d.toml", "name = \"box\"\ncount = 5\n");

    project
        .uxr()
        .args(["render", "t.txt", "-d", "d.toml"])
        .assert()
        .success()
        .stdout("box has many");
}

#[test]
fn test_later_data_files_win_for_blocks() {
    let project = TestProject::new();
    project.write("t.txt", "{{#if mode == \"dark\"}}dark{{#else}}light{{/if}}");
    project.write("base.json", r#"{"mode": "light"}"#);
    project.write("override.json", r#"{"mode": "dark"}"#);

    project
        .uxr()
        .args(["render", "t.txt", "-d", "base.json", "-d", "override.json"])
        .assert()
        .success()
        .stdout("dark");
}

#[test]
fn test_later_data_files_win_for_scalars() {
    let project = TestProject::new();
    project.write("t.txt", "{{name}} {{#if name == second}}yes{{/if}}");
    project.write("a.json", r#"{"name": "first"}"#);
    project.write("b.json", r#"{"name": "second"}"#);

    project
        .uxr()
        .args(["render", "t.txt", "-d", "a.json", "-d", "b.json"])
        .assert()
        .success()
        .stdout("second yes");
}

#[test]
fn test_render_template_from_stdin() {
    let project = TestProject::new();
    project.write("user.json", r#"{"name": "Ada"}"#);

    project
        .uxr()
        .args(["render", "-", "-d", "user.json"])
        .write_stdin("Hi {{name}}{{missing}}")
        .assert()
        .success()
        .stdout("Hi Ada");
}

#[test]
fn test_render_to_output_file() {
    let project = TestProject::new();
    project.write("t.txt", "v={{v}}");
    project.write("d.json", r#"{"v": 3}"#);

    project
        .uxr()
        .args(["render", "t.txt", "-d", "d.json", "-o", "out/result.txt"])
        .assert()
        .failure();

    std::fs::create_dir_all(project.path().join("out")).unwrap();
    project
        .uxr()
        .args(["render", "t.txt", "-d", "d.json", "-o", "out/result.txt"])
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(project.path().join("out/result.txt")).unwrap();
    assert_eq!(written, "v=3");
}

#[test]
fn test_render_without_data_strips_placeholders() {
    let project = TestProject::new();
    project.write("t.txt", "[{{a}}]{{#each xs}}x{{/each}}");

    project.uxr().args(["render", "t.txt"]).assert().success().stdout("[]{{#each xs}}x{{/each}}");
}

#[test]
fn test_missing_blocks_remove_from_config() {
    let project = TestProject::new();
    project.write("uxr-config.toml", "missing_blocks = \"remove\"\n");
    project.write("t.txt", "[{{#each xs}}x{{/each}}]");

    project.uxr().args(["render", "t.txt"]).assert().success().stdout("[]");
}

#[test]
fn test_disabled_config_returns_template() {
    let project = TestProject::new();
    project.write("uxr-config.toml", "enabled = false\n");
    project.write("t.txt", "{{keep}}");

    project.uxr().args(["render", "t.txt"]).assert().success().stdout("{{keep}}");
}

#[test]
fn test_template_too_large() {
    let project = TestProject::new();
    project.write("uxr-config.toml", "max_template_size = 4\n");
    project.write("t.txt", "0123456789");

    project
        .uxr()
        .args(["render", "t.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeding the limit of 4 bytes"))
        .stderr(predicate::str::contains("max_template_size"));
}

#[test]
fn test_invalid_data_file() {
    let project = TestProject::new();
    project.write("t.txt", "{{a}}");
    project.write("bad.json", "{not json");

    project
        .uxr()
        .args(["render", "t.txt", "-d", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse data file 'bad.json' as JSON"));
}

#[test]
fn test_unsupported_data_extension() {
    let project = TestProject::new();
    project.write("t.txt", "{{a}}");
    project.write("d.csv", "a,b");

    project
        .uxr()
        .args(["render", "t.txt", "-d", "d.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported data format 'csv'"));
}

#[test]
fn test_missing_template() {
    let project = TestProject::new();

    project
        .uxr()
        .args(["render", "nope.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read 'nope.html'"));
}
