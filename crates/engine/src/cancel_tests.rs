use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::task_scheduler::TaskScheduler;
use crate::test_support::{test_event, BlockingJob, RecordingJob};

#[tokio::test(start_paused = true)]
async fn forwards_events_as_cancellations_to_the_target() {
    let job = RecordingJob::new();
    let target = Arc::new(TaskScheduler::new(job.clone(), true, false, 5));

    target.process_event(test_event("/tmp/a")).await;
    assert_eq!(target.task_count(), 1);

    let cancel = Cancel::new(Arc::clone(&target));
    cancel.process_event(test_event("/tmp/a")).await;

    assert_eq!(target.task_count(), 0, "the delete event cancelled the pending task");

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(job.count(), 0, "the debounced job never ran");
}

#[tokio::test]
async fn is_a_noop_when_the_target_has_nothing_pending() {
    let job = RecordingJob::new();
    let target = Arc::new(TaskScheduler::new(job, true, false, 5));
    let cancel = Cancel::new(Arc::clone(&target));

    cancel.process_event(test_event("/tmp/nope")).await;

    assert_eq!(target.task_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn does_not_interrupt_a_task_already_running() {
    let job = BlockingJob::new();
    let target = Arc::new(TaskScheduler::new(job.clone(), true, false, 0));
    target.process_event(test_event("/tmp/a")).await;
    job.started.notified().await;

    let cancel = Cancel::new(Arc::clone(&target));
    cancel.process_event(test_event("/tmp/a")).await;

    assert_eq!(target.task_count(), 1, "a running task is not cancelable");
    job.release.notify_waiters();
}

#[tokio::test]
async fn own_lifecycle_hooks_are_inert() {
    let target = Arc::new(TaskScheduler::new(RecordingJob::new(), true, false, 5));
    let cancel = Cancel::new(Arc::clone(&target));

    // None of these touch the target; they only exist to satisfy the
    // `Scheduler` contract for a type that owns no tasks of its own.
    cancel.process_cancel_event(test_event("/tmp/a")).await;
    cancel.pause().await;
    cancel.shutdown(Duration::from_millis(1)).await;
}
