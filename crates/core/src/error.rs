// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error kinds (spec §7).
//!
//! `CancelledError` has no variant here: a cancelled debounce timer or a
//! shutdown-forced job abort is a normal control path (a dropped
//! `tokio::task::JoinHandle`), not a value that propagates through `Result`.

use thiserror::Error;

/// A recoverable per-task error: the job body hit a known, expected failure
/// mode (regex substitution produced an empty destination, destination
/// already exists, chmod/chown failed, subprocess spawn failed). Logged at
/// error level; the scheduler continues processing other paths.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{0}")]
    Message(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl OperationError {
    pub fn msg(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}

/// Malformed configuration: wrong type, missing daemon object, bad regex,
/// unknown event flag. Fatal at startup; during hot-reload, logged and the
/// old daemon continues running unaffected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),
    #[error("unknown event flag: {0}")]
    UnknownFlag(String),
    #[error("invalid regex {pattern:?}: {source}")]
    BadRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("io error reading config: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
