// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `RawConfig`: the on-disk TOML shape, and its conversion into a `Daemon`
//! (SPEC_FULL.md §4.8). The core crates (`fsw-engine`, `fsw-shell`,
//! `fsw-filemgr`) have no knowledge of this format; this module is the only
//! place TOML is parsed.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fsw_adapters::{regex_exclude_filter, Watch};
use fsw_engine::{Cancel, EventMap, Scheduler};
use fsw_filemgr::{Action, FileManagerScheduler, Rule};
use fsw_shell::shell_scheduler;
use serde::Deserialize;

use crate::daemon::Daemon;
use crate::error::DaemonError;

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_delay() -> u64 {
    0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RawConfig {
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
    #[serde(default)]
    pub watch: Vec<RawWatch>,
}

#[derive(Debug, Deserialize)]
pub struct RawWatch {
    pub path: Vec<String>,
    #[serde(default)]
    pub rec: bool,
    #[serde(default)]
    pub auto_add: bool,
    pub exclude: Option<String>,
    #[serde(default)]
    pub on: HashMap<String, RawSchedulerEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RawSchedulerEntry {
    pub scheduler: String,
    #[serde(default = "default_delay")]
    pub delay: u64,
    #[serde(default = "default_true")]
    pub files: bool,
    #[serde(default)]
    pub dirs: bool,
    pub cmd: Option<String>,
    pub target: Option<String>,
    #[serde(default)]
    pub rule: Vec<RawRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    pub action: String,
    pub src_re: String,
    #[serde(default)]
    pub dst_re: String,
    #[serde(default)]
    pub auto_create: bool,
    #[serde(default)]
    pub rec: bool,
    pub dirmode: Option<u32>,
    pub filemode: Option<u32>,
    pub user: Option<String>,
    pub group: Option<String>,
}

impl RawConfig {
    pub fn from_file(path: &Path) -> Result<Self, DaemonError> {
        let text = fs::read_to_string(path).map_err(|source| DaemonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, DaemonError> {
        toml::from_str(text).map_err(|source| DaemonError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate and convert into a runnable `Daemon`. Every `Rule`'s regex
    /// and every scheduler reference is checked here, matching
    /// SPEC_FULL.md's "`--configtest` additionally validates every `Rule`'s
    /// regex compiles" on top of mere TOML-shape parsing.
    pub fn into_daemon(self) -> Result<Daemon, DaemonError> {
        let mut watches = Vec::with_capacity(self.watch.len());
        for raw in self.watch {
            watches.push(Arc::new(raw.into_watch()?));
        }
        Ok(Daemon::new(watches, Duration::from_secs(self.shutdown_timeout)))
    }
}

impl RawWatch {
    fn into_watch(self) -> Result<Watch, DaemonError> {
        let mut built: HashMap<String, Arc<dyn Scheduler>> = HashMap::new();
        for (flag, entry) in &self.on {
            if entry.scheduler == "cancel" {
                continue;
            }
            built.insert(flag.clone(), entry.build_scheduler()?);
        }

        let mut event_map = EventMap::new();
        for (flag, entry) in &self.on {
            let scheduler = if entry.scheduler == "cancel" {
                let target_flag = entry.target.as_deref().ok_or(DaemonError::CancelMissingTarget)?;
                let target = built
                    .get(target_flag)
                    .cloned()
                    .ok_or_else(|| DaemonError::UnknownCancelTarget(target_flag.to_string()))?;
                Arc::new(Cancel::new(target)) as Arc<dyn Scheduler>
            } else {
                built.get(flag).cloned().expect("built in the first pass above")
            };
            event_map.set(flag, vec![scheduler])?;
        }

        if let Some(pattern) = &self.exclude {
            event_map.set_exclude_filter(regex_exclude_filter(pattern)?);
        }

        Ok(Watch::new(self.path, self.rec, self.auto_add, Arc::new(event_map)))
    }
}

impl RawSchedulerEntry {
    fn build_scheduler(&self) -> Result<Arc<dyn Scheduler>, DaemonError> {
        match self.scheduler.as_str() {
            "shell" => {
                let cmd = self.cmd.clone().ok_or(DaemonError::ShellMissingCmd)?;
                Ok(Arc::new(shell_scheduler(cmd, self.files, self.dirs, self.delay)))
            }
            "filemgr" => {
                let mut rules = Vec::with_capacity(self.rule.len());
                for raw in &self.rule {
                    rules.push(raw.clone().into_rule()?);
                }
                Ok(Arc::new(FileManagerScheduler::new(rules, self.files, self.dirs, self.delay)))
            }
            other => Err(DaemonError::UnknownSchedulerKind(other.to_string())),
        }
    }
}

impl RawRule {
    fn into_rule(self) -> Result<Rule, DaemonError> {
        let action = match self.action.as_str() {
            "copy" => Action::Copy,
            "move" => Action::Move,
            "delete" => Action::Delete,
            other => return Err(DaemonError::UnknownRuleAction(other.to_string())),
        };
        Ok(Rule::new(
            action,
            &self.src_re,
            self.dst_re,
            self.auto_create,
            self.rec,
            self.dirmode,
            self.filemode,
            self.user,
            self.group,
        )?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
