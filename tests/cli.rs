//! argument validation for the two executables

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn server_rejects_an_unparsable_address() {
    Command::cargo_bin("varstore-server")
        .unwrap()
        .args(&["--addr", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse"));
}

#[test]
fn client_rejects_an_unparsable_address() {
    Command::cargo_bin("varstore-client")
        .unwrap()
        .args(&["--addr", "999.999:nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse"));
}

#[test]
fn server_help_names_its_options() {
    Command::cargo_bin("varstore-server")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--addr").and(predicate::str::contains("--pool")));
}
