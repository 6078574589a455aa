// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mode + owner fixup (spec §4.3 "Mode+owner fixup"). Runs synchronously;
//! callers invoke it from a blocking task (see `job.rs`).

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use nix::unistd::{chown, Gid, Group, Uid, User};

use crate::error::FileManagerError;

/// Resolved numeric ids for an optional `(user, group)` pair. `None` means
/// "leave that id alone" (spec: "missing `mode` or missing `chown` means
/// skip that part").
#[derive(Clone, Copy)]
struct OwnerIds {
    uid: Option<Uid>,
    gid: Option<Gid>,
}

fn resolve_owner(user: Option<&str>, group: Option<&str>) -> Result<Option<OwnerIds>, FileManagerError> {
    if user.is_none() && group.is_none() {
        return Ok(None);
    }
    let uid = match user {
        Some(name) => Some(
            User::from_name(name)
                .map_err(|source| FileManagerError::LookupFailed {
                    what: format!("user {name:?}"),
                    source,
                })?
                .ok_or_else(|| FileManagerError::UnknownUser(name.to_string()))?
                .uid,
        ),
        None => None,
    };
    let gid = match group {
        Some(name) => Some(
            Group::from_name(name)
                .map_err(|source| FileManagerError::LookupFailed {
                    what: format!("group {name:?}"),
                    source,
                })?
                .ok_or_else(|| FileManagerError::UnknownGroup(name.to_string()))?
                .gid,
        ),
        None => None,
    };
    Ok(Some(OwnerIds { uid, gid }))
}

fn chmod_chown(path: &Path, mode: Option<u32>, owner: Option<OwnerIds>) -> Result<(), FileManagerError> {
    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    if let Some(owner) = owner {
        chown(path, owner.uid, owner.gid).map_err(|source| FileManagerError::Chown {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Apply mode/owner fixup to `root` and, if `root` is a directory and any of
/// `dirmode`/`filemode`/owner is set, recursively to its whole subtree
/// (spec §4.3):
///
/// ```text
/// chown = None if user and group both None else (user, group)
/// mode  = dirmode if isdir(path) else filemode
/// chmod+chown(path, mode, chown)          # always on the root
/// if isdir(path) and (dirmode or filemode or chown):
///     walk subtree:
///         for each subdir:  chmod+chown(sub, dirmode, chown)
///         for each file:    chmod+chown(sub, filemode, chown)
/// ```
pub fn apply_fixup(
    root: &Path,
    dirmode: Option<u32>,
    filemode: Option<u32>,
    user: Option<&str>,
    group: Option<&str>,
) -> Result<(), FileManagerError> {
    let owner = resolve_owner(user, group)?;
    let is_dir = root.is_dir();
    let root_mode = if is_dir { dirmode } else { filemode };
    chmod_chown(root, root_mode, owner)?;

    if is_dir && (dirmode.is_some() || filemode.is_some() || owner.is_some()) {
        walk_subtree(root, dirmode, filemode, owner)?;
    }
    Ok(())
}

fn walk_subtree(dir: &Path, dirmode: Option<u32>, filemode: Option<u32>, owner: Option<OwnerIds>) -> Result<(), FileManagerError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            chmod_chown(&path, dirmode, owner)?;
            walk_subtree(&path, dirmode, filemode, owner)?;
        } else {
            chmod_chown(&path, filemode, owner)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "fixup_tests.rs"]
mod tests;
