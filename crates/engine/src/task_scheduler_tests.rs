use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::test_support::{test_event, BlockingJob, FailingJob, RecordingJob};

#[tokio::test(start_paused = true)]
async fn debounce_coalesces_rapid_events_into_one_run_with_latest_event() {
    let job = RecordingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 2);

    sched.process_event(test_event("/tmp/a.txt")).await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    sched.process_event(test_event("/tmp/a.txt")).await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    sched.process_event(test_event("/tmp/a.txt")).await;
    tokio::time::sleep(Duration::from_millis(900)).await;

    let latest = test_event("/tmp/a.txt").with_src_pathname("/tmp/marker");
    sched.process_event(latest.clone()).await;

    assert_eq!(job.count(), 0, "still inside the debounce window");

    job.done.notified().await;

    assert_eq!(job.count(), 1, "exactly one job execution for the whole burst");
    assert_eq!(job.runs.lock()[0], latest, "the job ran with the latest event's data");
}

#[tokio::test(start_paused = true)]
async fn ongoing_job_is_never_interrupted_by_new_events() {
    let job = BlockingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 0);

    sched.process_event(test_event("/tmp/x")).await;
    job.started.notified().await;

    assert!(!sched.is_pending("/tmp/x"));
    assert_eq!(sched.task_count(), 1);

    sched.process_event(test_event("/tmp/x")).await;
    assert_eq!(
        job.run_count.load(Ordering::Acquire),
        1,
        "a second event must not start a second run while one is ongoing"
    );

    job.release.notify_waiters();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(sched.task_count(), 0, "task entry removed after the job finishes");
}

#[tokio::test(start_paused = true)]
async fn pause_cancels_pending_timer_and_blocks_new_schedules() {
    let job = RecordingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 10);

    sched.process_event(test_event("/tmp/a")).await;
    assert_eq!(sched.task_count(), 1);

    sched.pause().await;
    assert_eq!(sched.task_count(), 0, "pause cancels the pending debounce timer");

    sched.process_event(test_event("/tmp/b")).await;
    assert_eq!(sched.task_count(), 0, "a paused scheduler never tracks new tasks");

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(job.count(), 0, "no job ever ran");
}

#[tokio::test(start_paused = true)]
async fn shutdown_waits_then_aborts_stragglers() {
    let job = BlockingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 0);

    sched.process_event(test_event("/tmp/x")).await;
    job.started.notified().await;

    let start = tokio::time::Instant::now();
    sched.shutdown(Duration::from_secs(5)).await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_secs(5));
    assert_eq!(sched.task_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_returns_promptly_once_job_finishes_on_its_own() {
    let job = BlockingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 0);

    sched.process_event(test_event("/tmp/x")).await;
    job.started.notified().await;

    // Release the job shortly after shutdown starts draining.
    tokio::spawn({
        let job = Arc::clone(&job);
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            job.release.notify_waiters();
        }
    });

    let start = tokio::time::Instant::now();
    sched.shutdown(Duration::from_secs(30)).await;
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_secs(30), "must not wait the full timeout once drained");
}

#[tokio::test(start_paused = true)]
async fn process_cancel_event_removes_pending_task() {
    let job = RecordingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 5);

    sched.process_event(test_event("/tmp/a")).await;
    assert_eq!(sched.task_count(), 1);

    sched.process_cancel_event(test_event("/tmp/a")).await;
    assert_eq!(sched.task_count(), 0);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(job.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn process_cancel_event_is_noop_for_running_task() {
    let job = BlockingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 0);

    sched.process_event(test_event("/tmp/a")).await;
    job.started.notified().await;

    sched.process_cancel_event(test_event("/tmp/a")).await;
    assert_eq!(sched.task_count(), 1, "a running task is not cancelable");

    job.release.notify_waiters();
}

#[tokio::test]
async fn process_cancel_event_is_noop_when_absent() {
    let job = RecordingJob::new();
    let sched = TaskScheduler::new(job, true, false, 5);

    sched.process_cancel_event(test_event("/tmp/nope")).await;
    assert_eq!(sched.task_count(), 0);
}

#[tokio::test]
async fn filters_dir_events_when_dirs_disabled() {
    let job = RecordingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 0);
    let mut event = test_event("/tmp/d");
    event.dir = true;

    sched.process_event(event).await;
    tokio::task::yield_now().await;

    assert_eq!(job.count(), 0);
    assert_eq!(sched.task_count(), 0);
}

#[tokio::test]
async fn filters_file_events_when_files_disabled() {
    let job = RecordingJob::new();
    let sched = TaskScheduler::new(job.clone(), false, true, 0);

    sched.process_event(test_event("/tmp/f")).await;
    tokio::task::yield_now().await;

    assert_eq!(job.count(), 0);
}

#[tokio::test]
async fn failing_job_still_cleans_up_task_entry() {
    let sched = TaskScheduler::new(Arc::new(FailingJob), true, false, 0);

    sched.process_event(test_event("/tmp/a")).await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(sched.task_count(), 0, "cleanup runs even when the job returns an error");
}

#[tokio::test(start_paused = true)]
async fn singlejob_mode_collapses_all_paths_to_one_key() {
    let job = RecordingJob::new();
    let sched = TaskScheduler::new(job.clone(), true, false, 1).with_singlejob(true);

    sched.process_event(test_event("/tmp/a")).await;
    sched.process_event(test_event("/tmp/b")).await;
    assert_eq!(sched.task_count(), 1, "both paths collapse onto the singleton key");

    job.done.notified().await;

    assert_eq!(job.count(), 1);
    assert_eq!(job.runs.lock()[0].pathname, std::path::PathBuf::from("/tmp/b"));
}
