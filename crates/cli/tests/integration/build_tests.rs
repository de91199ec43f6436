//! Successful build integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn debug_build_stages_artifact() {
  let env = TestEnv::new("hello", "cargo_ok.sh");

  env
    .wasmstage_cmd()
    .arg(&env.project)
    .assert()
    .success()
    .stdout(predicate::str::contains("Staged"))
    .stdout(predicate::str::contains("hello.wasm"));

  assert_eq!(env.read_file("hello.wasm"), "fake debug artifact");
  assert_eq!(
    env.read_file("hello.wasm"),
    env.read_file("target/wasm32-unknown-unknown/debug/hello.wasm")
  );
  assert_eq!(
    env.read_file("toolchain-args.txt"),
    "build\n--target\nwasm32-unknown-unknown\n"
  );
}

#[test]
#[serial]
fn release_flag_selects_release_profile() {
  let env = TestEnv::new("hello", "cargo_ok.sh");

  env
    .wasmstage_cmd()
    .arg("--release")
    .arg(&env.project)
    .assert()
    .success()
    .stdout(predicate::str::contains("release"));

  assert_eq!(env.read_file("hello.wasm"), "fake release artifact");
  assert!(env.read_file("toolchain-args.txt").lines().any(|arg| arg == "--release"));
  assert!(!env.project.join("target/wasm32-unknown-unknown/debug").exists());
}

#[test]
#[serial]
fn relative_target_dir_reports_relative_paths() {
  let env = TestEnv::new("hello", "cargo_ok.sh");

  let output = env
    .wasmstage_cmd()
    .current_dir(env.temp.path())
    .args(["--output", "json", "hello"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(
    json["source_path"],
    "hello/target/wasm32-unknown-unknown/debug/hello.wasm"
  );
  assert_eq!(json["destination_path"], "hello/hello.wasm");
  assert_eq!(json["exit_code"], 0);
  assert_eq!(json["profile"], "debug");
}

#[test]
#[serial]
fn trailing_slash_uses_directory_name() {
  let env = TestEnv::new("hello", "cargo_ok.sh");

  env
    .wasmstage_cmd()
    .current_dir(env.temp.path())
    .arg("hello/")
    .assert()
    .success();

  assert!(env.project.join("hello.wasm").exists());
}

#[test]
#[serial]
fn name_flag_overrides_artifact_name() {
  let env = TestEnv::new("my-crate", "cargo_ok.sh");

  env
    .wasmstage_cmd()
    .env("FAKE_ARTIFACT_NAME", "my_crate")
    .args(["--name", "my_crate"])
    .arg(&env.project)
    .assert()
    .success();

  assert!(env.project.join("my_crate.wasm").exists());
  assert!(!env.project.join("my-crate.wasm").exists());
}

#[test]
#[serial]
fn cargo_flag_overrides_env() {
  let env = TestEnv::new("hello", "cargo_ok.sh");

  env
    .wasmstage_cmd()
    .env("WASMSTAGE_CARGO", "/nonexistent/cargo")
    .arg("--cargo")
    .arg(&env.toolchain)
    .arg(&env.project)
    .assert()
    .success();

  assert!(env.project.join("hello.wasm").exists());
}

#[test]
#[serial]
fn existing_artifact_is_overwritten() {
  let env = TestEnv::new("hello", "cargo_ok.sh");
  env.write_file("hello.wasm", "an older and longer artifact");

  env.wasmstage_cmd().arg(&env.project).assert().success();

  assert_eq!(env.read_file("hello.wasm"), "fake debug artifact");
}

#[test]
#[serial]
fn verbose_logs_toolchain_invocation() {
  let env = TestEnv::new("hello", "cargo_ok.sh");

  env
    .wasmstage_cmd()
    .arg("--verbose")
    .arg(&env.project)
    .assert()
    .success()
    .stderr(predicate::str::contains("running toolchain"));
}
