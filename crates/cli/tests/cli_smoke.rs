//! CLI smoke tests for vstamp.
//!
//! These run the binary in a temporary directory with an explicit
//! environment and check stdout, stderr and exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the vstamp binary with `BUILD_NUMBER` cleared.
fn vstamp_cmd(dir: &TempDir) -> Command {
  let mut cmd: Command = cargo_bin_cmd!("vstamp");
  cmd.current_dir(dir.path());
  cmd.env_remove("BUILD_NUMBER");
  cmd.env_remove("RUST_LOG");
  cmd
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  let temp = TempDir::new().unwrap();
  vstamp_cmd(&temp)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  let temp = TempDir::new().unwrap();
  vstamp_cmd(&temp)
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("vstamp"));
}

#[test]
fn subcommand_help_works() {
  let temp = TempDir::new().unwrap();
  for cmd in &["set-new-version", "info"] {
    vstamp_cmd(&temp)
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// set-new-version
// =============================================================================

#[test]
fn stamps_from_build_number_env() {
  let temp = TempDir::new().unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.0-SNAPSHOT"])
    .env("BUILD_NUMBER", "123")
    .assert()
    .success()
    .stdout("generateBackupPoms=false\nnewVersion=1.0.123\nreleaseVersion=1.0.123\n")
    .stderr(predicate::str::contains("Setting property newVersion and releaseVersion to: 1.0.123"))
    .stderr(predicate::str::contains("Setting property generateBackupPoms to false."));
}

#[test]
fn build_number_flag_overrides_env() {
  let temp = TempDir::new().unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "2.5-SNAPSHOT", "--build-number", "9"])
    .env("BUILD_NUMBER", "123")
    .assert()
    .success()
    .stdout(predicate::str::contains("newVersion=2.5.9"));
}

#[test]
fn non_snapshot_version_fails() {
  let temp = TempDir::new().unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.0"])
    .env("BUILD_NUMBER", "123")
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Not a SNAPSHOT version!!"));
}

#[test]
fn missing_build_number_fails() {
  let temp = TempDir::new().unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.0-SNAPSHOT"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Environment variable 'BUILD_NUMBER' not set!"));
}

#[test]
fn missing_project_version_is_usage_error() {
  let temp = TempDir::new().unwrap();

  vstamp_cmd(&temp)
    .arg("set-new-version")
    .assert()
    .failure()
    .stderr(predicate::str::contains("--project-version"));
}

#[test]
fn sub_module_is_skipped() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir(temp.path().join("module-a")).unwrap();
  let output = temp.path().join("release.properties");

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.0", "--basedir", "module-a"])
    .arg("--output")
    .arg(&output)
    .assert()
    .success()
    .stdout(predicate::str::contains("not the execution root"))
    .stderr(predicate::str::contains("is not the root project"));

  assert!(!output.exists());
}

#[test]
fn explicit_root_matching_basedir_is_stamped() {
  let temp = TempDir::new().unwrap();
  let module = temp.path().join("module-a");
  std::fs::create_dir(&module).unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.0-SNAPSHOT", "--build-number", "4"])
    .arg("--basedir")
    .arg(&module)
    .arg("--execution-root")
    .arg(&module)
    .assert()
    .success()
    .stdout(predicate::str::contains("releaseVersion=1.0.4"));
}

#[test]
fn writes_output_file() {
  let temp = TempDir::new().unwrap();
  let output = temp.path().join("release.properties");

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "3.0-SNAPSHOT", "--build-number", "17"])
    .arg("--output")
    .arg(&output)
    .assert()
    .success();

  let written = std::fs::read_to_string(&output).unwrap();
  assert_eq!(written, "generateBackupPoms=false\nnewVersion=3.0.17\nreleaseVersion=3.0.17\n");
}

#[test]
fn merges_existing_properties_file() {
  let temp = TempDir::new().unwrap();
  let input = temp.path().join("build.properties");
  std::fs::write(&input, "# from the build\nartifactId=demo\ngenerateBackupPoms=true\n").unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.1-SNAPSHOT", "--build-number", "2"])
    .arg("--properties")
    .arg(&input)
    .assert()
    .success()
    .stdout("artifactId=demo\ngenerateBackupPoms=false\nnewVersion=1.1.2\nreleaseVersion=1.1.2\n");
}

#[test]
fn keeps_unicode_escapes_from_jvm_written_file() {
  let temp = TempDir::new().unwrap();
  let input = temp.path().join("build.properties");
  std::fs::write(&input, "name=Caf\\u00e9\nnbsp=\\u00A0x\nfeed=\\fy\n").unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.1-SNAPSHOT", "--build-number", "2"])
    .arg("--properties")
    .arg(&input)
    .assert()
    .success()
    .stdout(predicate::str::contains("name=Caf\\u00E9\n"))
    .stdout(predicate::str::contains("nbsp=\\u00A0x\n"))
    .stdout(predicate::str::contains("feed=\\fy\n"));
}

#[test]
fn missing_properties_file_fails() {
  let temp = TempDir::new().unwrap();

  vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.0-SNAPSHOT", "--build-number", "1"])
    .args(["--properties", "does-not-exist.properties"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load properties file"));
}

#[test]
fn json_output() {
  let temp = TempDir::new().unwrap();

  let assert = vstamp_cmd(&temp)
    .args(["set-new-version", "--project-version", "1.0-SNAPSHOT", "--format", "json"])
    .env("BUILD_NUMBER", "123")
    .assert()
    .success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(
    value,
    serde_json::json!({
      "generateBackupPoms": "false",
      "newVersion": "1.0.123",
      "releaseVersion": "1.0.123",
    })
  );
}

#[test]
fn repeated_runs_produce_same_output() {
  let temp = TempDir::new().unwrap();
  let run = || {
    vstamp_cmd(&temp)
      .args(["set-new-version", "--project-version", "5.0-SNAPSHOT"])
      .env("BUILD_NUMBER", "77")
      .assert()
      .success()
      .get_output()
      .stdout
      .clone()
  };

  assert_eq!(run(), run());
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_shows_build_number_state() {
  let temp = TempDir::new().unwrap();

  vstamp_cmd(&temp)
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("BUILD_NUMBER"))
    .stdout(predicate::str::contains("(not set)"));

  vstamp_cmd(&temp)
    .arg("info")
    .env("BUILD_NUMBER", "321")
    .assert()
    .success()
    .stdout(predicate::str::contains("321"));
}
