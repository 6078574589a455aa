// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recoverable file-manager job errors (spec §4.3, §7 OperationError).

use std::path::PathBuf;

use fsw_core::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileManagerError {
    #[error("no rule matched pathname")]
    NoRuleMatched,
    #[error("regex substitution produced an empty destination path")]
    EmptyDestination,
    #[error("destination path exists: {0}")]
    DestinationExists(PathBuf),
    #[error("unknown user: {0}")]
    UnknownUser(String),
    #[error("unknown group: {0}")]
    UnknownGroup(String),
    #[error("chown failed on {path}: {source}")]
    Chown { path: PathBuf, source: nix::Error },
    #[error("failed to look up {what}: {source}")]
    LookupFailed { what: String, source: nix::Error },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("job task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<FileManagerError> for OperationError {
    fn from(e: FileManagerError) -> Self {
        OperationError::msg(e.to_string())
    }
}
