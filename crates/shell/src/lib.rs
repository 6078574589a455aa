// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ShellScheduler`: a `TaskScheduler` specialization whose job spawns a
//! shell command with templated placeholders (spec §4.2).

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod job;
mod quote;

pub use job::{ShellError, ShellJob};
pub use quote::shell_quote;

use std::sync::Arc;

use fsw_engine::TaskScheduler;

/// Build a `TaskScheduler` whose job runs `cmd` through `/bin/sh -c` with
/// `{maskname}`/`{pathname}`/`{src_pathname}` substituted and POSIX-quoted
/// (spec §4.2). This is the "thin job wrapped around a `TaskScheduler`"
/// specialization spec §9 describes for `ShellScheduler`.
pub fn shell_scheduler(cmd: impl Into<String>, files: bool, dirs: bool, delay: u64) -> TaskScheduler {
    let job = Arc::new(ShellJob::new(cmd));
    TaskScheduler::new(job, files, dirs, delay).with_name("shell")
}
