// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event record emitted by the inotify source.

use std::path::{Path, PathBuf};

/// One inotify event, as delivered by the notifier (see `fsw-adapters`).
///
/// Immutable: every scheduler that sees an `Event` sees the same data:
/// schedulers never mutate it, they only read `pathname`/`dir`/`maskname`/
/// `src_pathname` to decide what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Raw inotify bitmask.
    pub mask: u32,
    /// Human-readable flag name(s), `|`-joined (e.g. `"IN_MOVED_TO|IN_ISDIR"`).
    pub maskname: String,
    /// Absolute path the event occurred on.
    pub pathname: PathBuf,
    /// Set on move-from/move-to pairs: the path the item moved from/to.
    pub src_pathname: Option<PathBuf>,
    /// Whether `pathname` is a directory.
    pub dir: bool,
    /// Opaque watch descriptor, as assigned by the notifier.
    pub wd: i32,
}

impl Event {
    /// The substring of `maskname` before the first `|`.
    ///
    /// `"IN_MOVED_TO|IN_ISDIR"` -> `"IN_MOVED_TO"`.
    pub fn primary_flag(&self) -> &str {
        self.maskname.split('|').next().unwrap_or(&self.maskname)
    }

    /// Convenience constructor for a file event with no move-pairing.
    pub fn new(mask: u32, maskname: impl Into<String>, pathname: impl Into<PathBuf>, dir: bool, wd: i32) -> Self {
        Self {
            mask,
            maskname: maskname.into(),
            pathname: pathname.into(),
            src_pathname: None,
            dir,
            wd,
        }
    }

    /// Builder: attach a `src_pathname` (for move-from/move-to pairs).
    pub fn with_src_pathname(mut self, src: impl Into<PathBuf>) -> Self {
        self.src_pathname = Some(src.into());
        self
    }

    /// The path used as this event's task-index key (see `fsw-engine`).
    pub fn path(&self) -> &Path {
        &self.pathname
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
