// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds an [`ExcludeFilter`] from a configured regex pattern (spec §3
//! "optional `exclude_filter: predicate(path) -> bool`").

use fsw_engine::ExcludeFilter;
use regex::Regex;

use crate::error::WatchError;

/// Compile `pattern` into a filter matching `Event::pathname.to_string_lossy()`.
pub fn regex_exclude_filter(pattern: &str) -> Result<ExcludeFilter, WatchError> {
    let re = Regex::new(pattern).map_err(|source| WatchError::BadExcludeRegex {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(std::sync::Arc::new(move |path: &std::path::Path| re.is_match(&path.to_string_lossy())))
}

#[cfg(test)]
#[path = "exclude_tests.rs"]
mod tests;
