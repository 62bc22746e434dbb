use predicates::prelude::predicate;

#[test]
fn help_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("catalog"));
}

#[test]
fn version_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_emits_structured_usage_error() {
    assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .arg("frobnicate")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("input_usage_error"));
}
