use std::process::{Command, Stdio};
use std::time::Duration;

use tempfile::tempdir;

use crate::prelude::{wait_for, write_file};

#[test]
fn a_close_write_event_runs_the_configured_shell_command() {
    let watch_dir = tempdir().expect("watch dir");
    let work_dir = tempdir().expect("work dir");
    let marker = work_dir.path().join("marker");
    let config = work_dir.path().join("fswatchd.toml");

    write_file(
        &config,
        &format!(
            r#"
shutdown_timeout = 2

[[watch]]
path = ["{watch}"]

[watch.on.IN_CLOSE_WRITE]
scheduler = "shell"
delay = 0
cmd = "echo {{pathname}} >> {marker}"
"#,
            watch = watch_dir.path().display(),
            marker = marker.display(),
        ),
    );

    let binary = assert_cmd::cargo::cargo_bin("fswatchd");
    let mut child = Command::new(binary)
        .args(["--config", config.to_str().expect("utf8 path")])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn fswatchd");

    // Give the watch a moment to register before triggering an event.
    std::thread::sleep(Duration::from_millis(200));

    let target = watch_dir.path().join("incoming.txt");
    write_file(&target, "hello");

    let saw_marker = wait_for(3000, || marker.exists());

    let _ = nix::sys::signal::kill(nix::unistd::Pid::from_raw(child.id() as i32), nix::sys::signal::Signal::SIGTERM);
    let _ = child.wait();

    assert!(saw_marker, "expected the configured shell command to have run");
    let contents = std::fs::read_to_string(&marker).unwrap_or_default();
    assert!(contents.contains("incoming.txt"), "marker contents: {contents:?}");
}

#[test]
fn a_delete_event_before_the_debounce_delay_elapses_cancels_the_pending_command() {
    let watch_dir = tempdir().expect("watch dir");
    let work_dir = tempdir().expect("work dir");
    let marker = work_dir.path().join("marker");
    let config = work_dir.path().join("fswatchd.toml");

    write_file(
        &config,
        &format!(
            r#"
shutdown_timeout = 2

[[watch]]
path = ["{watch}"]

[watch.on.IN_CLOSE_WRITE]
scheduler = "shell"
delay = 2
cmd = "echo ran >> {marker}"

[watch.on.IN_DELETE]
scheduler = "cancel"
target = "IN_CLOSE_WRITE"
"#,
            watch = watch_dir.path().display(),
            marker = marker.display(),
        ),
    );

    let binary = assert_cmd::cargo::cargo_bin("fswatchd");
    let mut child = Command::new(binary)
        .args(["--config", config.to_str().expect("utf8 path")])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn fswatchd");

    std::thread::sleep(Duration::from_millis(200));

    let target = watch_dir.path().join("incoming.txt");
    write_file(&target, "hello");
    std::fs::remove_file(&target).expect("remove before debounce elapses");

    // The command's 2s debounce would have fired by now had it not been
    // cancelled by the delete event.
    std::thread::sleep(Duration::from_millis(2500));

    let _ = nix::sys::signal::kill(nix::unistd::Pid::from_raw(child.id() as i32), nix::sys::signal::Signal::SIGTERM);
    let _ = child.wait();

    assert!(!marker.exists(), "the cancelled command should never have run");
}
