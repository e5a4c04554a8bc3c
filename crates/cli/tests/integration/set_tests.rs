use predicates::prelude::*;

use super::common::{TestEnv, stdout_json};

#[test]
fn set_creates_manifest() {
  let env = TestEnv::empty();

  env
    .stackup_cmd()
    .args(["set", "./web", "name", "web"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Manifest written to"));

  let written = env.read_manifest();
  assert!(written.contains("applications:"));
  assert!(written.contains("./web:"));
  assert!(written.contains("name: web"));
}

#[test]
fn set_nested_key_preserves_other_fields() {
  let env = TestEnv::from_fixture("stack.yml");

  env
    .stackup_cmd()
    .args(["set", "./db", "framework.info.mem", "2G"])
    .assert()
    .success();

  // ./db is never created on disk
  let output = env
    .stackup_cmd()
    .args(["targets", "db", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());
  let json = stdout_json(&output);
  assert_eq!(json["targets"][0]["mem"], "2G");

  let written = env.read_manifest();
  assert!(written.contains("name: standalone"));
  assert!(written.find("./frontend").unwrap() < written.find("./backend").unwrap());
}

#[test]
fn set_value_is_parsed_as_yaml() {
  let env = TestEnv::from_fixture("stack.yml");

  env
    .stackup_cmd()
    .args(["set", "./frontend", "instances", "4"])
    .assert()
    .success();

  let output = env
    .stackup_cmd()
    .args(["order", "--format", "json"])
    .output()
    .unwrap();
  let json = stdout_json(&output);
  assert_eq!(json["targets"][2]["instances"], 4);
}

#[test]
fn set_depends_on_changes_order() {
  let env = TestEnv::from_fixture("stack.yml");

  env
    .stackup_cmd()
    .args(["set", "./db", "depends-on", "[./frontend]"])
    .assert()
    .success();

  env
    .stackup_cmd()
    .arg("order")
    .assert()
    .failure()
    .stderr(predicate::str::contains("circular dependency detected"));
}

#[test]
fn set_rejects_non_string_name() {
  let env = TestEnv::from_fixture("stack.yml");
  let before = env.read_manifest();

  env
    .stackup_cmd()
    .args(["set", "./db", "name", "[1, 2]"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected a string"));

  assert_eq!(env.read_manifest(), before);
}

#[test]
fn set_rejects_empty_key_segment() {
  let env = TestEnv::from_fixture("stack.yml");

  env
    .stackup_cmd()
    .args(["set", "./db", "framework..mem", "1G"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("segments cannot be empty"));
}
