use predicates::prelude::*;

use super::TestProject;

#[test]
fn test_config_path_uses_env() {
    let project = TestProject::new();

    project
        .uxr()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uxr-config.toml"));
}

#[test]
fn test_config_path_flag_wins() {
    let project = TestProject::new();

    project
        .uxr()
        .args(["--config", "other.toml", "config", "path"])
        .assert()
        .success()
        .stdout("other.toml\n");
}

#[test]
fn test_config_show_defaults() {
    let project = TestProject::new();

    project
        .uxr()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("enabled = true"))
        .stdout(predicate::str::contains("missing_blocks = \"preserve\""));
}

#[test]
fn test_config_init_then_refuse_overwrite() {
    let project = TestProject::new();

    project.uxr().args(["config", "init"]).assert().success();
    let written = std::fs::read_to_string(project.config_path()).unwrap();
    assert!(written.contains("missing_blocks = \"preserve\""));

    project
        .uxr()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    project.uxr().args(["config", "init", "--force"]).assert().success();
}

#[test]
fn test_invalid_config_reports_error() {
    let project = TestProject::new();
    project.write("uxr-config.toml", "enabled = \"maybe\"\n");
    project.write("t.txt", "x");

    project
        .uxr()
        .args(["render", "t.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
