// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `FileManagerScheduler`: a `TaskScheduler` specialization that matches
//! the event's pathname against a rule table before delegating (spec §4.3).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fsw_core::Event;
use fsw_engine::{Scheduler, TaskScheduler};
use tracing::debug;

use crate::job::FileManagerJob;
use crate::rule::Rule;

/// Wraps a `TaskScheduler<FileManagerJob>` with a rule-matching gate in
/// front of `process_event` (spec §4.3: "Override of `process_event`:
/// first filter by files/dirs (as base), then look up the first matching
/// rule... Otherwise delegate to base `process_event`."). `files`/`dirs`
/// filtering itself still happens inside the wrapped `TaskScheduler`.
pub struct FileManagerScheduler {
    rules: Arc<Vec<Rule>>,
    inner: TaskScheduler,
}

impl FileManagerScheduler {
    pub fn new(rules: Vec<Rule>, files: bool, dirs: bool, delay: u64) -> Self {
        let rules = Arc::new(rules);
        let job = Arc::new(FileManagerJob::new(Arc::clone(&rules)));
        let inner = TaskScheduler::new(job, files, dirs, delay).with_name("filemgr");
        Self { rules, inner }
    }
}

#[async_trait]
impl Scheduler for FileManagerScheduler {
    async fn process_event(&self, event: Event) {
        if !self.rules.iter().any(|r| r.matches(&event.pathname)) {
            debug!(pathname = %event.pathname.display(), "no rule matches, dropping event");
            return;
        }
        self.inner.process_event(event).await;
    }

    async fn process_cancel_event(&self, event: Event) {
        self.inner.process_cancel_event(event).await;
    }

    async fn pause(&self) {
        self.inner.pause().await;
    }

    async fn shutdown(&self, timeout: Duration) {
        self.inner.shutdown(timeout).await;
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
