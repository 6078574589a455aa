// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `EventMap`: flag name -> ordered list of schedulers, with an optional
//! path-exclusion filter (spec §4.5).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use fsw_core::{is_known_flag, ConfigError, Event};
use tracing::debug;

use crate::scheduler::Scheduler;

/// A predicate over an event's path; events matching it are dropped before
/// reaching any scheduler.
pub type ExcludeFilter = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

#[derive(Default)]
pub struct EventMap {
    map: HashMap<String, Vec<Arc<dyn Scheduler>>>,
    exclude_filter: Option<ExcludeFilter>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `default` to every known flag name (spec §4.5 "default_scheduler
    /// binds every known flag to it"), then apply `overrides` on top —
    /// setting a flag to `None` via [`EventMap::unset`] removes it again.
    pub fn with_default(default: Arc<dyn Scheduler>) -> Self {
        let mut map = HashMap::new();
        for flag in fsw_core::KNOWN_FLAGS {
            map.insert((*flag).to_string(), vec![Arc::clone(&default)]);
        }
        Self {
            map,
            exclude_filter: None,
        }
    }

    /// Bind one or more schedulers to `flag`. Returns an error if `flag`
    /// isn't a known inotify flag name.
    pub fn set(&mut self, flag: &str, schedulers: Vec<Arc<dyn Scheduler>>) -> Result<(), ConfigError> {
        if !is_known_flag(flag) {
            return Err(ConfigError::UnknownFlag(flag.to_string()));
        }
        self.map.insert(flag.to_string(), schedulers);
        Ok(())
    }

    /// Remove any binding for `flag` (spec §4.5 "Setting None for a flag
    /// removes it").
    pub fn unset(&mut self, flag: &str) {
        self.map.remove(flag);
    }

    pub fn set_exclude_filter(&mut self, filter: ExcludeFilter) {
        self.exclude_filter = Some(filter);
    }

    /// The deduplicated set of every scheduler bound to any flag (needed by
    /// `Daemon` for `pause`/`shutdown`). Deduplicates by `Arc` identity, as
    /// spec §9 prescribes, since the same scheduler commonly sits behind
    /// several flags (e.g. `IN_CLOSE_WRITE` and `IN_MOVED_TO`).
    pub fn schedulers(&self) -> Vec<Arc<dyn Scheduler>> {
        let mut seen: Vec<Arc<dyn Scheduler>> = Vec::new();
        for list in self.map.values() {
            for s in list {
                if !seen.iter().any(|existing| Arc::ptr_eq(existing, s)) {
                    seen.push(Arc::clone(s));
                }
            }
        }
        seen
    }

    /// The notifier's callback: classify, filter, and fan out to every
    /// scheduler bound to the event's primary flag.
    pub async fn process_event(&self, event: Event) {
        let primary = event.primary_flag().to_string();
        let Some(schedulers) = self.map.get(&primary) else {
            return;
        };

        if let Some(filter) = &self.exclude_filter {
            if filter(&event.pathname) {
                debug!(pathname = %event.pathname.display(), "excluded by filter");
                return;
            }
        }

        for scheduler in schedulers {
            let scheduler = Arc::clone(scheduler);
            let event = event.clone();
            tokio::spawn(async move {
                scheduler.process_event(event).await;
            });
        }
    }
}

#[cfg(test)]
#[path = "event_map_tests.rs"]
mod tests;
