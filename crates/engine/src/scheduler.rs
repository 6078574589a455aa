// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Scheduler` and `Job` trait contracts (spec §4.1, §9).

use std::time::Duration;

use async_trait::async_trait;
use fsw_core::{Event, OperationError, TaskId};

/// The work a `TaskScheduler` runs once its debounce delay has elapsed.
///
/// Corresponds to spec §4 "job: async fn(Event, task_id) -> ()"; errors are
/// caught at the `TaskScheduler::_run_job` boundary and logged, never
/// propagated (spec §7).
#[async_trait]
pub trait Job: Send + Sync {
    async fn run(&self, event: &Event, task_id: &TaskId) -> Result<(), OperationError>;
}

/// Any closure `Fn(Event, TaskId) -> Future<Output = Result<(), OperationError>>`
/// is itself a `Job`, matching spec §9's "callables are boxed closures."
#[async_trait]
impl<F, Fut> Job for F
where
    F: Fn(Event, TaskId) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<(), OperationError>> + Send,
{
    async fn run(&self, event: &Event, task_id: &TaskId) -> Result<(), OperationError> {
        (self)(event.clone(), task_id.clone()).await
    }
}

/// Capability every event recipient in an `EventMap` implements: process a
/// forward-moving event, process a cancellation event, pause, and drain on
/// shutdown (spec §4.1, §4.4).
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Ingest one event moving a task forward (schedule or re-schedule).
    async fn process_event(&self, event: Event);

    /// Ingest an event that means "abandon any pending task for this key."
    async fn process_cancel_event(&self, event: Event);

    /// Prevent new jobs from starting. Does not abort in-flight jobs.
    async fn pause(&self);

    /// Wait up to `timeout` for in-flight jobs to finish, then cancel the
    /// stragglers.
    async fn shutdown(&self, timeout: Duration);
}
