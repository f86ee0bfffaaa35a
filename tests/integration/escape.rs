use super::TestProject;

#[test]
fn test_escape_id_selector() {
    let project = TestProject::new();

    project
        .uxr()
        .args(["escape", "#form:field.name"])
        .assert()
        .success()
        .stdout("#form\\:field\\.name\n");
}

#[test]
fn test_escape_leaves_class_selectors() {
    let project = TestProject::new();

    project.uxr().args(["escape", ".menu:hover"]).assert().success().stdout(".menu:hover\n");
}
