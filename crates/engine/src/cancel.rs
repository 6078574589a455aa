// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Cancel`: a `Scheduler` adapter that turns incoming events into
//! cancellations of a target scheduler's pending tasks (spec §4.4). Typical
//! use: bind `IN_DELETE`/`IN_MOVED_FROM` to `Cancel::new(target)` so a
//! delete-before-debounce-fires abandons the scheduled job cleanly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fsw_core::Event;

use crate::scheduler::Scheduler;

pub struct Cancel {
    target: Arc<dyn Scheduler>,
}

impl Cancel {
    pub fn new(target: Arc<dyn Scheduler>) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Scheduler for Cancel {
    async fn process_event(&self, event: Event) {
        self.target.process_cancel_event(event).await;
    }

    /// `Cancel` owns no tasks of its own; nothing to abandon on cancel.
    async fn process_cancel_event(&self, _event: Event) {}

    /// No-op: `Cancel` has no pending/running state of its own.
    async fn pause(&self) {}

    /// No-op: `Cancel` has no pending/running state of its own.
    async fn shutdown(&self, _timeout: Duration) {}
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
