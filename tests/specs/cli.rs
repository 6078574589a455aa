use crate::prelude::fswatchd;

#[test]
fn version_flag_exits_zero_and_prints_the_binary_name() {
    fswatchd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("fswatchd"));
}

#[test]
fn list_flag_prints_every_known_flag_and_exits_zero() {
    fswatchd()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicates::str::contains("IN_CLOSE_WRITE"))
        .stdout(predicates::str::contains("IN_MOVED_TO"))
        .stdout(predicates::str::contains("IN_DELETE"));
}

#[test]
fn list_and_install_are_mutually_exclusive() {
    fswatchd().args(["--list", "--install"]).assert().failure();
}

#[test]
fn install_without_root_exits_with_code_two() {
    // The sandbox test runner may itself be root, in which case this
    // invariant can't be exercised; skip rather than false-fail.
    if nix::unistd::Uid::effective().is_root() {
        return;
    }
    fswatchd().arg("--install").assert().code(2);
}
