use std::sync::Arc;

use fsw_adapters::Watch;
use fsw_engine::EventMap;
use tempfile::tempdir;

use super::*;

fn empty_watch() -> Arc<Watch> {
    Arc::new(Watch::new(vec!["/tmp".to_string()], false, false, Arc::new(EventMap::new())))
}

#[tokio::test]
async fn warns_but_does_not_fail_with_no_watches() {
    let daemon = Daemon::new(Vec::new(), Duration::from_secs(1));
    daemon.start().expect("starting with no watches succeeds");
    assert_eq!(daemon.watch_count(), 0);
}

#[tokio::test]
async fn pause_and_shutdown_are_no_ops_with_no_schedulers() {
    let daemon = Daemon::new(vec![empty_watch()], Duration::from_secs(1));
    daemon.start().expect("start");
    daemon.pause().await;
    daemon.shutdown().await;
}

#[tokio::test]
async fn reload_swaps_the_current_daemon() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("fswatchd.toml");
    std::fs::write(&config_path, "shutdown_timeout = 1\n").expect("write config");

    let raw = RawConfig::from_file(&config_path).expect("load");
    let initial = raw.into_daemon().expect("convert");
    let handle = DaemonHandle::new(initial, config_path.clone());

    let before = handle.current();
    handle.reload().await.expect("reload");
    let after = handle.current();

    assert!(!Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn reload_surfaces_a_parse_error_without_swapping() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("fswatchd.toml");
    std::fs::write(&config_path, "shutdown_timeout = 1\n").expect("write config");

    let raw = RawConfig::from_file(&config_path).expect("load");
    let initial = raw.into_daemon().expect("convert");
    let handle = DaemonHandle::new(initial, config_path.clone());
    let before = handle.current();

    std::fs::write(&config_path, "not valid toml = = =").expect("overwrite with bad config");
    let err = handle.reload().await.unwrap_err();
    assert!(matches!(err, DaemonError::Toml { .. }));

    let after = handle.current();
    assert!(Arc::ptr_eq(&before, &after));
}
