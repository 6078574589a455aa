// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors from standing up a `Watch` (spec §4.6, §6).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("no path matched glob pattern {0:?}")]
    NoPathsMatched(String),
    #[error("invalid glob pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("notify backend error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Watch::start must be called from within a tokio runtime")]
    NoRuntime,
    #[error("invalid exclude_filter regex {pattern:?}: {source}")]
    BadExcludeRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
