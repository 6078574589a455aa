use tempfile::tempdir;

use crate::prelude::{fswatchd, write_file};

#[test]
fn configtest_accepts_a_well_formed_config() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("fswatchd.toml");
    write_file(
        &config,
        r#"
shutdown_timeout = 5

[[watch]]
path = ["/tmp"]

[watch.on.IN_CLOSE_WRITE]
scheduler = "shell"
cmd = "true"
"#,
    );

    fswatchd()
        .args(["--config", config.to_str().expect("utf8 path"), "--configtest"])
        .assert()
        .success();
}

#[test]
fn configtest_rejects_a_bad_rule_regex() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("fswatchd.toml");
    write_file(
        &config,
        r#"
[[watch]]
path = ["/tmp"]

[watch.on.IN_CLOSE_WRITE]
scheduler = "filemgr"

[[watch.on.IN_CLOSE_WRITE.rule]]
action = "delete"
src_re = "("
"#,
    );

    fswatchd()
        .args(["--config", config.to_str().expect("utf8 path"), "--configtest"])
        .assert()
        .code(1);
}

#[test]
fn configtest_rejects_a_missing_file() {
    fswatchd()
        .args(["--config", "/definitely/does/not/exist.toml", "--configtest"])
        .assert()
        .code(1);
}
