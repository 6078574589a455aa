// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job body `FileManagerScheduler` runs: copy/move/delete keyed by the
//! matched rule's action, plus auto-create and mode/owner fixup (spec §4.3).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fsw_core::{Event, OperationError, TaskId};
use fsw_engine::Job;
use tracing::{debug, error};

use crate::error::FileManagerError;
use crate::fixup::apply_fixup;
use crate::rule::{Action, Rule};

/// Runs the file operation for whichever rule first matches the event's
/// pathname. The match is re-derived here (rather than threaded through
/// from `FileManagerScheduler::process_event`) since `Job::run` only
/// receives the `Event`; re-scanning a handful of regexes is cheap and
/// keeps `TaskScheduler` oblivious to rules entirely.
pub struct FileManagerJob {
    rules: Arc<Vec<Rule>>,
}

impl FileManagerJob {
    pub fn new(rules: Arc<Vec<Rule>>) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl Job for FileManagerJob {
    async fn run(&self, event: &Event, task_id: &TaskId) -> Result<(), OperationError> {
        let rules = Arc::clone(&self.rules);
        let pathname = event.pathname.clone();
        let tid = task_id.clone();

        let joined = tokio::task::spawn_blocking(move || run_matched_rule(&rules, &pathname)).await;

        match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                error!(task_id = %tid, error = %e, "file-manager job failed");
                Err(e.into())
            }
            Err(join_err) => Err(FileManagerError::Join(join_err).into()),
        }
    }
}

fn run_matched_rule(rules: &[Rule], pathname: &Path) -> Result<(), FileManagerError> {
    let rule = rules.iter().find(|r| r.matches(pathname)).ok_or(FileManagerError::NoRuleMatched)?;
    match rule.action {
        Action::Copy => copy_or_move(rule, pathname, false),
        Action::Move => copy_or_move(rule, pathname, true),
        Action::Delete => delete(rule, pathname),
    }
}

fn copy_or_move(rule: &Rule, src: &Path, is_move: bool) -> Result<(), FileManagerError> {
    let dst = rule.substitute(src);
    if dst.as_os_str().is_empty() {
        return Err(FileManagerError::EmptyDestination);
    }
    if dst.exists() {
        return Err(FileManagerError::DestinationExists(dst));
    }

    if rule.auto_create {
        if let Some(parent) = dst.parent() {
            if !parent.exists() {
                if let Some(shallowest) = shallowest_missing_ancestor(parent) {
                    fs::create_dir_all(parent)?;
                    apply_fixup(&shallowest, rule.dirmode, rule.filemode, rule.user.as_deref(), rule.group.as_deref())?;
                }
            }
        }
    }

    if is_move {
        fs::rename(src, &dst)?;
    } else if src.is_dir() {
        copy_dir_recursive(src, &dst)?;
    } else {
        fs::copy(src, &dst)?;
    }

    apply_fixup(&dst, rule.dirmode, rule.filemode, rule.user.as_deref(), rule.group.as_deref())?;
    Ok(())
}

fn delete(rule: &Rule, path: &Path) -> Result<(), FileManagerError> {
    if path.is_dir() {
        if rule.rec {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_dir(path)?;
        }
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Walk upward from `dir` while each ancestor is missing; returns the
/// topmost (shallowest) missing directory, or `None` if `dir` already
/// exists (spec §4.3 "find the shallowest missing ancestor").
fn shallowest_missing_ancestor(dir: &Path) -> Option<PathBuf> {
    let mut missing = None;
    let mut cur = dir;
    while !cur.exists() {
        missing = Some(cur.to_path_buf());
        match cur.parent() {
            Some(parent) => cur = parent,
            None => break,
        }
    }
    missing
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    debug!(from = %src.display(), to = %dst.display(), "recursive copy complete");
    Ok(())
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
