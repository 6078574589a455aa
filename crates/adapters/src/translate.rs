// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Converts a `notify` crate event into zero, one, or two `fsw_core::Event`s.
//!
//! `notify` hides the raw inotify mask behind `EventKind`, and delivers a
//! rename as two separate callback invocations (one `RenameMode::From`, one
//! `RenameMode::To`) correlated only by an opaque "tracker" id, except on
//! some backends where it arrives as a single `RenameMode::Both` event
//! carrying both paths. `MoveCorrelator` bridges both shapes back to the
//! `IN_MOVED_FROM`/`IN_MOVED_TO` pair with `src_pathname` spec §3 expects.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fsw_core::{flag_bit, Event};
use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};
use notify::EventKind;

fn primary_flag_for(kind: &EventKind, path: &Path) -> Option<&'static str> {
    match kind {
        EventKind::Create(_) => Some("IN_CREATE"),
        EventKind::Remove(_) => Some("IN_DELETE"),
        EventKind::Modify(ModifyKind::Data(_)) => Some("IN_MODIFY"),
        EventKind::Modify(ModifyKind::Metadata(_)) => Some("IN_ATTRIB"),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some("IN_MOVED_FROM"),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some("IN_MOVED_TO"),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => None,
        EventKind::Modify(ModifyKind::Any) | EventKind::Modify(ModifyKind::Other) => Some("IN_ATTRIB"),
        EventKind::Access(AccessKind::Open(_)) => Some("IN_OPEN"),
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => Some("IN_CLOSE_WRITE"),
        EventKind::Access(AccessKind::Close(_)) => Some("IN_CLOSE_NOWRITE"),
        EventKind::Access(_) => Some("IN_ACCESS"),
        EventKind::Other => {
            let _ = path;
            None
        }
        EventKind::Any => None,
    }
}

fn build(path: &Path, flag: &str, dir: bool, wd: i32) -> Event {
    let mask = flag_bit(flag) | if dir { flag_bit("IN_ISDIR") } else { 0 };
    let maskname = if dir { format!("{flag}|IN_ISDIR") } else { flag.to_string() };
    Event::new(mask, maskname, path, dir, wd)
}

/// Per-`Watch` state for stitching `RenameMode::From`/`To` pairs back
/// together across two separate notifier callbacks.
#[derive(Default)]
pub struct MoveCorrelator {
    pending_from: HashMap<usize, PathBuf>,
}

impl MoveCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one notifier event, using and updating move-pairing state.
    pub fn translate(&mut self, event: &notify::Event, wd: i32) -> Vec<Event> {
        if let EventKind::Modify(ModifyKind::Name(RenameMode::Both)) = event.kind {
            if let [from, to] = event.paths.as_slice() {
                let dir = to.is_dir();
                let from_evt = build(from, "IN_MOVED_FROM", dir, wd);
                let to_evt = build(to, "IN_MOVED_TO", dir, wd).with_src_pathname(from.clone());
                return vec![from_evt, to_evt];
            }
        }

        if let EventKind::Modify(ModifyKind::Name(RenameMode::From)) = event.kind {
            if let (Some(path), Some(tracker)) = (event.paths.first(), event.attrs.tracker()) {
                self.pending_from.insert(tracker, path.clone());
                return vec![build(path, "IN_MOVED_FROM", path.is_dir(), wd)];
            }
        }

        if let EventKind::Modify(ModifyKind::Name(RenameMode::To)) = event.kind {
            if let Some(path) = event.paths.first() {
                let dir = path.is_dir();
                let mut evt = build(path, "IN_MOVED_TO", dir, wd);
                if let Some(tracker) = event.attrs.tracker() {
                    if let Some(src) = self.pending_from.remove(&tracker) {
                        evt = evt.with_src_pathname(src);
                    }
                }
                return vec![evt];
            }
        }

        let Some(path) = event.paths.first() else {
            return Vec::new();
        };
        let Some(flag) = primary_flag_for(&event.kind, path) else {
            return Vec::new();
        };
        event
            .paths
            .iter()
            .map(|p| build(p, flag, p.is_dir(), wd))
            .collect()
    }
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
