// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Daemon`: a set of `Watch`es plus orchestration for start/pause/shutdown
//! and hot reload (spec §4.7).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fsw_adapters::Watch;
use fsw_engine::Scheduler;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::RawConfig;
use crate::error::DaemonError;

/// An ordered set of `Watch`es, each with its own `EventMap`, sharing one
/// graceful-shutdown timeout.
pub struct Daemon {
    watches: Vec<Arc<Watch>>,
    shutdown_timeout: Duration,
}

impl Daemon {
    pub fn new(watches: Vec<Arc<Watch>>, shutdown_timeout: Duration) -> Self {
        Self { watches, shutdown_timeout }
    }

    /// Number of configured watches. Exposed for `--configtest`/tests.
    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    /// Start every configured watch. Warns (does not fail) if there are
    /// none, matching spec §4.7 "Warn if no watches."
    pub fn start(&self) -> Result<(), DaemonError> {
        if self.watches.is_empty() {
            warn!("daemon: starting with no configured watches");
        }
        for watch in &self.watches {
            watch.start()?;
        }
        Ok(())
    }

    /// Every unique scheduler reachable through any watch's `EventMap`,
    /// deduplicated by `Arc` identity (spec §4.7).
    fn schedulers(&self) -> Vec<Arc<dyn Scheduler>> {
        let mut seen: Vec<Arc<dyn Scheduler>> = Vec::new();
        for watch in &self.watches {
            for scheduler in watch.event_map().schedulers() {
                if !seen.iter().any(|existing| Arc::ptr_eq(existing, &scheduler)) {
                    seen.push(scheduler);
                }
            }
        }
        seen
    }

    pub async fn pause(&self) {
        for scheduler in self.schedulers() {
            scheduler.pause().await;
        }
    }

    /// Pause every scheduler, wait (bounded by `shutdown_timeout`) for
    /// in-flight jobs to finish, then stop every watch (spec §4.7). Every
    /// scheduler's `shutdown` runs concurrently, each in its own task.
    pub async fn shutdown(&self) {
        self.pause().await;
        let timeout = self.shutdown_timeout;
        let handles: Vec<_> = self
            .schedulers()
            .into_iter()
            .map(|scheduler| tokio::spawn(async move { scheduler.shutdown(timeout).await }))
            .collect();
        for handle in handles {
            let _ = handle.await;
        }
        for watch in &self.watches {
            watch.stop();
        }
    }
}

/// Owns the `Arc<Daemon>` the signal dispatcher acts on, so `reload` can
/// swap it out without the dispatcher ever observing a half-built daemon
/// (spec §4.7 "Reload must never block signal handling").
pub struct DaemonHandle {
    current: Mutex<Arc<Daemon>>,
    config_path: PathBuf,
}

impl DaemonHandle {
    pub fn new(initial: Daemon, config_path: PathBuf) -> Self {
        Self {
            current: Mutex::new(Arc::new(initial)),
            config_path,
        }
    }

    pub fn current(&self) -> Arc<Daemon> {
        Arc::clone(&self.current.lock())
    }

    /// Hot-reload: build a new `Daemon` from the config file, pause the old
    /// one, start the new one, then retire the old one in the background.
    /// The caller (the SIGHUP handler) must not `.await` this inline if it
    /// wants signal handling to stay responsive while the old daemon drains
    /// — spawn it instead, as `fsw-cli`'s signal loop does.
    pub async fn reload(&self) -> Result<(), DaemonError> {
        let raw = RawConfig::from_file(&self.config_path)?;
        let new_daemon = Arc::new(raw.into_daemon()?);

        let old = self.current();
        old.pause().await;
        new_daemon.start()?;

        let old_for_drain = Arc::clone(&old);
        tokio::spawn(async move {
            old_for_drain.shutdown().await;
            info!("reload: old daemon drained");
        });

        *self.current.lock() = new_daemon;
        Ok(())
    }
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
