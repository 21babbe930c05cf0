use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn create_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let base = dir.path();
    fs::write(base.join("testfile.ts"), "console.log(\"hello\");").unwrap();
    fs::write(base.join("testfile.md"), "# Test Markdown File").unwrap();
    let sub = base.join("ignored-folder");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("ignored.ts"), "ignored").unwrap();
    dir
}

fn aggrecat() -> Command {
    Command::cargo_bin("aggrecat").unwrap()
}

#[test]
fn version_flag_reports_package_version() {
    aggrecat()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn full_emits_tree_and_headers() {
    let project = create_project();
    aggrecat()
        .arg("full")
        .arg("--project-root")
        .arg(project.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("── testfile.ts"))
        .stdout(predicate::str::contains("--- testfile.ts ---"))
        .stdout(predicate::str::contains("console.log(\"hello\");"));
}

#[test]
fn files_omits_the_tree_section() {
    let project = create_project();
    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("── ").not())
        .stdout(predicate::str::contains("--- testfile.md ---"));
}

#[test]
fn no_headers_suppresses_header_lines() {
    let project = create_project();
    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("--no-headers")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("---").not())
        .stdout(predicate::str::contains("console.log(\"hello\");"));
}

#[test]
fn extension_filter_narrows_the_run() {
    let project = create_project();
    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("-e")
        .arg("ts")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("testfile.ts"))
        .stdout(predicate::str::contains("testfile.md").not());
}

#[test]
fn ignore_pattern_prunes_directory_from_tree_and_contents() {
    let project = create_project();
    aggrecat()
        .arg("full")
        .arg("--project-root")
        .arg(project.path())
        .arg("--ignore")
        .arg("**/ignored-folder/**")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored-folder").not())
        .stdout(predicate::str::contains("testfile.ts"));
}

#[test]
fn tree_command_renders_only_the_tree() {
    let project = create_project();
    aggrecat()
        .arg("tree")
        .arg("--project-root")
        .arg(project.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("── testfile.ts"))
        .stdout(predicate::str::contains("console.log").not());
}

#[test]
fn save_writes_the_blob_to_disk() {
    let project = create_project();
    let out = project.path().join("out").join("context.txt");
    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("--ignore")
        .arg("**/out/**")
        .arg("--save")
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success();

    let saved = fs::read_to_string(&out).unwrap();
    assert!(saved.contains("--- testfile.ts ---"));
}

#[test]
fn missing_project_root_fails_with_filesystem_exit_code() {
    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg("/definitely/not/a/real/path")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn missing_start_path_reports_discovery_failure() {
    let project = create_project();
    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("--start")
        .arg("non-existent-folder")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error finding files"));
}

#[test]
fn config_command_prints_default_toml() {
    aggrecat()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored_paths"))
        .stdout(predicate::str::contains("node_modules"))
        .stdout(predicate::str::contains("include_file_headers = true"));
}

#[test]
fn config_file_in_project_root_is_picked_up() {
    let project = create_project();
    fs::write(
        project.path().join("aggrecat.toml"),
        "file_extensions = [\"md\"]\ninclude_file_headers = false\n",
    )
    .unwrap();

    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Test Markdown File"))
        .stdout(predicate::str::contains("testfile.ts").not())
        .stdout(predicate::str::contains("--- ").not());
}

#[test]
fn invalid_batch_size_is_rejected() {
    let project = create_project();
    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("--batch-size")
        .arg("0")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Batch size"));
}

#[test]
fn masterplan_preamble_leads_the_output() {
    let project = create_project();
    fs::write(project.path().join("masterplan.md"), "# Project Masterplan").unwrap();

    aggrecat()
        .arg("files")
        .arg("--project-root")
        .arg(project.path())
        .arg("--include-masterplan")
        .arg("-e")
        .arg("ts")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Project Masterplan"));
}
