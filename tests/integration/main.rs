//! Integration tests for the docverify CLI
//!
//! Each test gets its own data directory through `DOCVERIFY_HOME` and drives
//! the binary the way an operator would: init → institution add → request
//! create → process.


use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create a docverify command bound to `home`
fn docverify(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("docverify"));
    cmd.env("DOCVERIFY_HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Run a command with `--json` and parse its stdout
fn json_output(home: &Path, args: &[&str]) -> Value {
    let output = docverify(home).arg("--json").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Initialize a data directory and register two institutions
fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    docverify(home).arg("init").assert().success();
    for (id, name) in [("uni-accra", "University of Accra"), ("uni-kumasi", "Kumasi University")] {
        docverify(home)
            .args(["--role", "platform_admin", "institution", "add", id, name])
            .assert()
            .success();
    }
    temp
}

/// Submit a request from uni-accra to uni-kumasi and return its id
fn create_request(home: &Path) -> String {
    let created = json_output(
        home,
        &[
            "--role",
            "regulator_admin",
            "request",
            "create",
            "--from",
            "uni-accra",
            "--to",
            "uni-kumasi",
            "--student-name",
            "Ama Mensah",
            "--student-id",
            "UA-2017-311",
            "--program",
            "BSc Nursing",
            "--graduated",
            "2021-06-30",
            "--type",
            "transcript",
        ],
    );
    created["id"].as_str().unwrap().to_string()
}

// =============================================================================
// INIT TESTS
// =============================================================================

#[test]
fn test_init_creates_config_and_store() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("data");

    docverify(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("docverify initialized!"));

    assert!(home.join("docverify.toml").exists());
    assert!(home.join("store.json").exists());

    docverify(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn test_init_force_resets_store() {
    let temp = setup();
    let home = temp.path();
    create_request(home);

    docverify(home).args(["init", "--force"]).assert().success();

    docverify(home)
        .args(["institution", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No institutions registered."));
}

// =============================================================================
// INSTITUTION TESTS
// =============================================================================

#[test]
fn test_institution_add_requires_platform_admin() {
    let temp = setup();

    docverify(temp.path())
        .args(["--role", "regulator_admin", "institution", "add", "uew", "Winneba"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    docverify(temp.path())
        .args(["--role", "platform", "institution", "add", "uew", "Winneba", "-k", "college"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered uew (college)"));
}

#[test]
fn test_institution_list_shows_registered() {
    let temp = setup();

    docverify(temp.path())
        .args(["institution", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uni-accra"))
        .stdout(predicate::str::contains("Kumasi University"));

    let listed = json_output(temp.path(), &["institution", "list"]);
    assert_eq!(listed["institutions"].as_array().unwrap().len(), 2);
}

// =============================================================================
// REQUEST TESTS
// =============================================================================

#[test]
fn test_request_create_and_list() {
    let temp = setup();
    let home = temp.path();
    let id = create_request(home);

    docverify(home)
        .args(["--role", "regulator_admin", "request", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("1 request(s)"));

    // Staff of the requesting institution see it; a stranger does not
    let mine = json_output(
        home,
        &["--role", "institution_user", "--institution", "uni-accra", "request", "list"],
    );
    assert_eq!(mine["requests"].as_array().unwrap().len(), 1);

    docverify(home)
        .args(["--role", "platform_admin", "institution", "add", "poly-ho", "Ho Polytechnic"])
        .assert()
        .success();
    docverify(home)
        .args(["--role", "institution_user", "--institution", "poly-ho", "request", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No requests."));
}

#[test]
fn test_request_create_rejects_bad_input() {
    let temp = setup();

    docverify(temp.path())
        .args([
            "--role",
            "regulator_admin",
            "request",
            "create",
            "--from",
            "uni-accra",
            "--to",
            "uni-kumasi",
            "--student-name",
            "Ama Mensah",
            "--student-id",
            "UA-2017-311",
            "--program",
            "BSc Nursing",
            "--graduated",
            "30/06/2021",
            "--type",
            "transcript",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid graduation date"));

    docverify(temp.path())
        .args([
            "--role",
            "regulator_admin",
            "request",
            "create",
            "--to",
            "uni-nowhere",
            "--from",
            "uni-accra",
            "--student-name",
            "Ama Mensah",
            "--student-id",
            "UA-2017-311",
            "--program",
            "BSc Nursing",
            "--graduated",
            "2021-06-30",
            "--type",
            "degree",
        ])
        .assert()
        .failure();
}

#[test]
fn test_commands_need_a_role() {
    let temp = setup();

    docverify(temp.path())
        .args(["request", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--role"));

    docverify(temp.path())
        .args(["--role", "institution_user", "request", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--institution is required"));

    docverify(temp.path())
        .args(["--role", "student", "status"])
        .assert()
        .failure();
}

// =============================================================================
// MODERATION TESTS
// =============================================================================

#[test]
fn test_reject_and_flag() {
    let temp = setup();
    let home = temp.path();
    let id = create_request(home);

    docverify(home)
        .args(["--role", "regulator_admin", "flag", &id, "mismatched_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flagged"));

    docverify(home)
        .args(["--role", "regulator_admin", "reject", &id, "-r", "Name does not match records"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rejected"));

    docverify(home)
        .args(["--role", "regulator_admin", "process", &id, "-p", "1", "-s", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("closed"));
}

#[test]
fn test_document_attach() {
    let temp = setup();
    let home = temp.path();
    let id = create_request(home);

    docverify(home)
        .args([
            "--role",
            "institution_user",
            "--institution",
            "uni-kumasi",
            "document",
            &id,
            "transcript.pdf",
            "-t",
            "transcript",
            "-s",
            "20480",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation status: pending"));

    docverify(home)
        .args([
            "--role",
            "regulator_admin",
            "document",
            &id,
            "transcript.docx",
            "-t",
            "transcript",
            "-s",
            "20480",
        ])
        .assert()
        .failure();
}

// =============================================================================
// STATUS AND VERSION TESTS
// =============================================================================

#[test]
fn test_status_counts() {
    let temp = setup();
    let home = temp.path();
    create_request(home);
    create_request(home);

    let status = json_output(home, &["--role", "regulator_admin", "status"]);
    assert_eq!(status["requests"], 2);
    assert_eq!(status["institutions"], 2);
    assert_eq!(status["by_status"]["submitted"], 2);
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();

    docverify(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("docverify v"));

    let version = json_output(temp.path(), &["version"]);
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_memory_backend_keeps_nothing() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    fs::write(
        home.join("docverify.toml"),
        "[storage]\nbackend = \"memory\"\n",
    )
    .unwrap();

    docverify(home)
        .args(["--role", "platform_admin", "institution", "add", "uew", "Winneba"])
        .assert()
        .success();
    docverify(home)
        .args(["institution", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No institutions registered."));
    assert!(!home.join("store.json").exists());
}
