// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup/reload-time fatal errors (spec.md §7 is silent on config-loading
//! errors since loading is out of scope there; this formalizes the ambient
//! config-loading path SPEC_FULL.md §4.8 adds).

use std::path::PathBuf;

use fsw_adapters::WatchError;
use fsw_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("unknown scheduler kind {0:?} (expected \"shell\", \"filemgr\", or \"cancel\")")]
    UnknownSchedulerKind(String),
    #[error("scheduler \"cancel\" entry missing required \"target\" flag")]
    CancelMissingTarget,
    #[error("cancel target {0:?} is not bound to any scheduler in this watch")]
    UnknownCancelTarget(String),
    #[error("scheduler \"shell\" entry missing required \"cmd\" field")]
    ShellMissingCmd,
    #[error("unknown rule action {0:?} (expected \"copy\", \"move\", or \"delete\")")]
    UnknownRuleAction(String),
    #[error("watch failed to start: {0}")]
    Watch(#[from] WatchError),
}
