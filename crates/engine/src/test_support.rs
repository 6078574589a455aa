// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use fsw_core::{Event, OperationError, TaskId};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::scheduler::Job;

/// A job that records every event it's run with and how many times it ran.
pub(crate) struct RecordingJob {
    pub runs: Mutex<Vec<Event>>,
    pub run_count: AtomicUsize,
    /// Notified once per completed run, so tests can wait for a run without
    /// sleeping on wall-clock time.
    pub done: Notify,
}

impl RecordingJob {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            runs: Mutex::new(Vec::new()),
            run_count: AtomicUsize::new(0),
            done: Notify::new(),
        })
    }

    pub fn count(&self) -> usize {
        self.run_count.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Job for RecordingJob {
    async fn run(&self, event: &Event, _task_id: &TaskId) -> Result<(), OperationError> {
        self.runs.lock().push(event.clone());
        self.run_count.fetch_add(1, Ordering::AcqRel);
        self.done.notify_waiters();
        Ok(())
    }
}

/// A job that blocks on an externally-controlled `Notify` before returning,
/// used to keep a task "running" (`cancelable == false`) for as long as a
/// test needs.
pub(crate) struct BlockingJob {
    pub release: Notify,
    pub started: Notify,
    pub run_count: AtomicUsize,
}

impl BlockingJob {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            release: Notify::new(),
            started: Notify::new(),
            run_count: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Job for BlockingJob {
    async fn run(&self, _event: &Event, _task_id: &TaskId) -> Result<(), OperationError> {
        self.run_count.fetch_add(1, Ordering::AcqRel);
        self.started.notify_waiters();
        self.release.notified().await;
        Ok(())
    }
}

/// A job that always fails, to exercise the "errors never propagate out of
/// `process_event`" path.
pub(crate) struct FailingJob;

#[async_trait]
impl Job for FailingJob {
    async fn run(&self, _event: &Event, _task_id: &TaskId) -> Result<(), OperationError> {
        Err(OperationError::msg("boom"))
    }
}

pub(crate) fn test_event(pathname: &str) -> Event {
    Event::new(0, "IN_CLOSE_WRITE", pathname, false, 1)
}
