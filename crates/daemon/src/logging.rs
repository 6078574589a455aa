// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured logging setup (SPEC_FULL.md §4.9): `tracing` +
//! `tracing-subscriber` with an `EnvFilter`, matching the teacher's own
//! subscriber setup minus file rotation — logging sink configuration is
//! explicitly out of scope (spec §1).

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber. `debug` lowers the default
/// filter level, matching spec §6's `--debug` flag; `RUST_LOG` still
/// overrides it when set.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}
