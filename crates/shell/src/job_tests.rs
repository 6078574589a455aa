use fsw_core::Event;

use super::*;

fn event(pathname: &str) -> Event {
    Event::new(0, "IN_CLOSE_WRITE", pathname, false, 1)
}

#[test]
fn render_substitutes_all_three_placeholders_quoted() {
    // spec §8 S4: maskname="IN_MOVED_TO|IN_ISDIR", pathname="/t/b c",
    // src_pathname="/t/a d" -> `echo IN_MOVED_TO '/t/b c' '/t/a d'`
    let job = ShellJob::new("echo {maskname} {pathname} {src_pathname}");
    let mut e = event("/t/b c");
    e.maskname = "IN_MOVED_TO|IN_ISDIR".to_string();
    e.src_pathname = Some("/t/a d".into());

    assert_eq!(job.render(&e), "echo IN_MOVED_TO '/t/b c' '/t/a d'");
}

#[test]
fn render_uses_empty_string_when_src_pathname_absent() {
    let job = ShellJob::new("mv {src_pathname}{pathname}");
    let e = event("/tmp/a");
    assert_eq!(job.render(&e), "mv '''/tmp/a'");
}

#[tokio::test]
async fn run_spawns_the_rendered_command_and_waits_for_completion() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let job = ShellJob::new(format!("touch {}", shell_quote(&marker.to_string_lossy())));

    let result = job.run(&event("/tmp/a"), &TaskId::generate()).await;

    assert!(result.is_ok());
    assert!(marker.exists());
}

#[tokio::test]
async fn run_propagates_non_zero_exit_as_an_operation_error() {
    let job = ShellJob::new("exit 7");
    let result = job.run(&event("/tmp/a"), &TaskId::generate()).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("exited with"));
}

#[tokio::test]
async fn run_reports_placeholder_values_to_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let job = ShellJob::new(format!("echo -n {{pathname}} > {}", shell_quote(&out.to_string_lossy())));

    job.run(&event("/srv/in/file.txt"), &TaskId::generate()).await.unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "/srv/in/file.txt");
}
