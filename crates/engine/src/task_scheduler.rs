// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `TaskScheduler`: the generic debounced per-path task lifecycle engine
//! (spec §4.1). This is the hard part of the system; every other scheduler
//! in this workspace (`ShellScheduler`, `FileManagerScheduler`) is a thin
//! job wrapped around one of these.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fsw_core::{Event, TaskId};
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::scheduler::{Job, Scheduler};

/// `"singleton"`, the task-index key used when a scheduler is built with
/// `with_singlejob(true)`: every path collapses onto one live task.
const SINGLETON_KEY: &str = "singleton";

struct TaskState {
    id: TaskId,
    /// Holds the spawned sleep-then-job task. While `cancelable` is true,
    /// aborting this handle is equivalent to abandoning the debounce timer
    /// (the job body hasn't started yet); once `cancelable` flips false the
    /// handle is mid-job and is only aborted by a shutdown timeout.
    handle: JoinHandle<()>,
    cancelable: Arc<AtomicBool>,
}

/// Generic, debounced, per-path task lifecycle (spec §4.1).
///
/// Holds `tasks: map<TaskIndexKey, TaskState>` behind a `parking_lot::Mutex`
/// — the map is logically owned by one cooperative-loop actor (spec §5), the
/// lock just lets `EventMap` dispatch concurrently to several schedulers
/// without each one needing its own executor thread.
pub struct TaskScheduler {
    job: Arc<dyn Job>,
    files: bool,
    dirs: bool,
    delay: u64,
    singlejob: bool,
    name: String,
    tasks: Arc<Mutex<HashMap<String, TaskState>>>,
    paused: Arc<AtomicBool>,
    drain_notify: Arc<Notify>,
}

impl TaskScheduler {
    /// `files`/`dirs` gate the acceptance filter (spec §4.1); `delay` is the
    /// debounce window in seconds.
    pub fn new(job: Arc<dyn Job>, files: bool, dirs: bool, delay: u64) -> Self {
        Self {
            job,
            files,
            dirs,
            delay,
            singlejob: false,
            name: "sched".to_string(),
            tasks: Arc::new(Mutex::new(HashMap::new())),
            paused: Arc::new(AtomicBool::new(false)),
            drain_notify: Arc::new(Notify::new()),
        }
    }

    /// Name used in log lines (`{scheduler}` field). Defaults to `"sched"`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Experimental: collapse every path onto a single task-index key, so at
    /// most one task is ever live across *all* paths (spec §9 open question).
    pub fn with_singlejob(mut self, singlejob: bool) -> Self {
        self.singlejob = singlejob;
        self
    }

    fn task_index(&self, event: &Event) -> String {
        if self.singlejob {
            SINGLETON_KEY.to_string()
        } else {
            event.pathname.to_string_lossy().into_owned()
        }
    }

    /// How many tasks are currently tracked. Exposed for tests exercising
    /// spec §8 invariant 3 (`|tasks[k]| <= 1`) and invariant 4 (cleanup).
    pub fn task_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Whether a live, still-cancelable (debounce pending) task exists for
    /// `key`. Exposed for tests.
    pub fn is_pending(&self, key: &str) -> bool {
        self.tasks
            .lock()
            .get(key)
            .is_some_and(|s| s.cancelable.load(Ordering::Acquire))
    }

    fn spawn_run(&self, event: Event, key: String, task_id: TaskId) -> TaskState {
        let cancelable = Arc::new(AtomicBool::new(true));
        let cancelable_inner = Arc::clone(&cancelable);
        let delay = self.delay;
        let job = Arc::clone(&self.job);
        let tasks = Arc::clone(&self.tasks);
        let drain_notify = Arc::clone(&self.drain_notify);
        let name = self.name.clone();
        let maskname = event.primary_flag().to_string();
        let pathname = event.pathname.display().to_string();
        let tid = task_id.clone();
        let key_for_task = key.clone();

        let handle = tokio::spawn(async move {
            if delay > 0 {
                tokio::time::sleep(Duration::from_secs(delay)).await;
            }

            // Point of no return: from here on, subsequent events for this
            // key are never cancelled (spec §3 invariant: cancelable flips
            // true -> false once, never back).
            cancelable_inner.store(false, Ordering::Release);

            info!(scheduler = %name, %maskname, %pathname, task_id = %tid, "execute task");
            match job.run(&event, &tid).await {
                Ok(()) => {
                    info!(scheduler = %name, task_id = %tid, "task finished");
                }
                Err(e) => {
                    warn!(scheduler = %name, task_id = %tid, error = %e, "task failed");
                }
            }

            // Guaranteed-exit cleanup: only remove if this task is still the
            // current occupant of `key` (a re-schedule could have replaced it,
            // though in practice a running, non-cancelable task is never
            // replaced — see process_event).
            let mut tasks = tasks.lock();
            if tasks.get(&key_for_task).is_some_and(|s| s.id == tid) {
                tasks.remove(&key_for_task);
            }
            drop(tasks);
            drain_notify.notify_waiters();
        });

        TaskState {
            id: task_id,
            handle,
            cancelable,
        }
    }

    /// Cancel and drop every currently-pending (debounce timer still
    /// running) task. Called from `pause()` so that invariant 5 ("while
    /// paused, no job transitions from timer-pending to running") holds even
    /// when no further events arrive for an already-pending path.
    fn cancel_all_pending(&self) {
        let mut tasks = self.tasks.lock();
        let pending: Vec<String> = tasks
            .iter()
            .filter(|(_, s)| s.cancelable.load(Ordering::Acquire))
            .map(|(k, _)| k.clone())
            .collect();
        for key in pending {
            if let Some(state) = tasks.remove(&key) {
                debug!(scheduler = %self.name, task_id = %state.id, "pause: cancelling pending task");
                state.handle.abort();
            }
        }
    }
}

#[async_trait]
impl Scheduler for TaskScheduler {
    async fn process_event(&self, event: Event) {
        debug!(scheduler = %self.name, pathname = %event.pathname.display(), "received event");

        if (event.dir && !self.dirs) || (!event.dir && !self.files) {
            debug!(scheduler = %self.name, pathname = %event.pathname.display(), "filtered: files/dirs mismatch");
            return;
        }

        let key = self.task_index(&event);
        let maskname = event.primary_flag().to_string();
        let pathname = event.pathname.display().to_string();

        let restart;
        let task_id;
        {
            let mut tasks = self.tasks.lock();
            match tasks.get(&key) {
                None => {
                    task_id = TaskId::generate();
                    restart = false;
                }
                Some(state) => {
                    if state.cancelable.load(Ordering::Acquire) {
                        state.handle.abort();
                        if self.paused.load(Ordering::Acquire) {
                            let removed = tasks.remove(&key);
                            if let Some(removed) = removed {
                                info!(scheduler = %self.name, %maskname, %pathname, task_id = %removed.id, "paused: dropping re-scheduled task");
                            }
                            return;
                        }
                        task_id = state.id.clone();
                        restart = true;
                    } else {
                        info!(scheduler = %self.name, %maskname, %pathname, task_id = %state.id, "skip event due to ongoing task");
                        return;
                    }
                }
            }

            if self.paused.load(Ordering::Acquire) {
                // A brand-new key arriving while paused never gets a timer.
                return;
            }

            if restart {
                info!(scheduler = %self.name, %maskname, %pathname, task_id = %task_id, delay = self.delay, "re-schedule task");
            } else {
                info!(scheduler = %self.name, %maskname, %pathname, task_id = %task_id, delay = self.delay, "schedule task");
            }

            let state = self.spawn_run(event, key.clone(), task_id);
            tasks.insert(key, state);
        }
    }

    async fn process_cancel_event(&self, event: Event) {
        debug!(scheduler = %self.name, pathname = %event.pathname.display(), "received cancel event");
        let key = self.task_index(&event);
        let maskname = event.primary_flag().to_string();
        let pathname = event.pathname.display().to_string();

        let mut tasks = self.tasks.lock();
        if let Some(state) = tasks.get(&key) {
            if state.cancelable.load(Ordering::Acquire) {
                let state = tasks.remove(&key).expect("just matched present key");
                info!(scheduler = %self.name, %maskname, %pathname, task_id = %state.id, "scheduled task cancelled");
                state.handle.abort();
            } else {
                info!(scheduler = %self.name, %maskname, %pathname, task_id = %state.id, "cancel event ignored: task already running");
            }
        }
    }

    async fn pause(&self) {
        self.paused.store(true, Ordering::Release);
        self.cancel_all_pending();
    }

    async fn shutdown(&self, timeout: Duration) {
        self.pause().await;

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let running = self.tasks.lock().len();
            if running == 0 {
                break;
            }
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                break;
            }
            tokio::select! {
                _ = self.drain_notify.notified() => {}
                _ = tokio::time::sleep(remaining) => break,
            }
        }

        let stragglers: Vec<(String, TaskId, JoinHandle<()>)> = {
            let mut tasks = self.tasks.lock();
            let keys: Vec<String> = tasks.keys().cloned().collect();
            keys.into_iter()
                .filter_map(|k| tasks.remove(&k).map(|s| (k, s.id, s.handle)))
                .collect()
        };
        for (_, task_id, handle) in stragglers {
            warn!(scheduler = %self.name, %task_id, "shutdown: terminating task still running after timeout");
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "task_scheduler_tests.rs"]
mod tests;
