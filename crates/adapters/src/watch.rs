// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Watch`: owns the notifier registration for one set of configured paths
//! (spec §4.6).

use std::path::PathBuf;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use fsw_engine::EventMap;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::WatchError;
use crate::translate::MoveCorrelator;

static NEXT_WD: AtomicI32 = AtomicI32::new(1);

/// Expands `pattern` via glob (spec §4.6 "glob expansion enabled"). A
/// pattern with no glob metacharacters that doesn't currently exist on disk
/// is returned as-is, so a path that will be created later can still be
/// named in configuration.
fn expand(pattern: &str) -> Vec<PathBuf> {
    match glob::glob(pattern) {
        Ok(paths) => {
            let matches: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
            if matches.is_empty() {
                vec![PathBuf::from(pattern)]
            } else {
                matches
            }
        }
        Err(_) => vec![PathBuf::from(pattern)],
    }
}

/// One `notify` watch covering the paths matched by a configured set of
/// patterns, feeding every event to a shared [`EventMap`].
pub struct Watch {
    patterns: Vec<String>,
    rec: bool,
    auto_add: bool,
    event_map: Arc<EventMap>,
    wd: i32,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl Watch {
    pub fn new(patterns: Vec<String>, rec: bool, auto_add: bool, event_map: Arc<EventMap>) -> Self {
        Self {
            patterns,
            rec,
            auto_add,
            event_map,
            wd: NEXT_WD.fetch_add(1, Ordering::Relaxed),
            watcher: Mutex::new(None),
        }
    }

    /// Start watching. Requires an active tokio runtime (the notifier
    /// callback forwards into `EventMap::process_event`, an async fn).
    pub fn start(&self) -> Result<(), WatchError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| WatchError::NoRuntime)?;

        let paths: Vec<PathBuf> = self.patterns.iter().flat_map(|p| expand(p)).collect();
        if paths.is_empty() {
            return Err(WatchError::NoPathsMatched(self.patterns.join(", ")));
        }

        let event_map = Arc::clone(&self.event_map);
        let wd = self.wd;
        let correlator = Arc::new(Mutex::new(MoveCorrelator::new()));

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "watch: notifier error");
                    return;
                }
            };
            let events = correlator.lock().translate(&event, wd);
            for event in events {
                debug!(pathname = %event.pathname.display(), maskname = %event.maskname, "watch: event");
                let event_map = Arc::clone(&event_map);
                handle.spawn(async move {
                    event_map.process_event(event).await;
                });
            }
        })?;

        let mode = if self.rec || self.auto_add {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        for path in &paths {
            watcher.watch(path, mode)?;
        }

        *self.watcher.lock() = Some(watcher);
        Ok(())
    }

    /// Tear down the notifier. Safe to call when not started, or twice.
    pub fn stop(&self) {
        self.watcher.lock().take();
    }

    /// This watch's `EventMap`, so `Daemon` can enumerate every unique
    /// scheduler reachable through it (spec §4.7).
    pub fn event_map(&self) -> &Arc<EventMap> {
        &self.event_map
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
