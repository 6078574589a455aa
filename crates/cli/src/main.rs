// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fswatchd` - a debounced filesystem-event task daemon.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod install;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use fsw_daemon::{init_logging, DaemonHandle, RawConfig};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

/// Watches configured directory trees and dispatches debounced shell
/// commands or file-manager rules per event (spec §1).
#[derive(Parser)]
#[command(name = "fswatchd", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "/etc/fswatchd/config.toml")]
    config: PathBuf,

    /// Lower the log level to debug.
    #[arg(long)]
    debug: bool,

    /// Print every known inotify event-flag name and exit.
    #[arg(long, conflicts_with_all = ["install", "uninstall", "configtest"])]
    list: bool,

    /// Install the systemd unit file (requires root).
    #[arg(long, conflicts_with_all = ["list", "uninstall", "configtest"])]
    install: bool,

    /// Remove the systemd unit file (requires root).
    #[arg(long, conflicts_with_all = ["list", "install", "configtest"])]
    uninstall: bool,

    /// Parse and validate the config, then exit without starting.
    #[arg(long, conflicts_with_all = ["list", "install", "uninstall"])]
    configtest: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for flag in fsw_core::KNOWN_FLAGS {
            println!("{flag}");
        }
        std::process::exit(0);
    }

    if cli.install {
        std::process::exit(install::install());
    }

    if cli.uninstall {
        std::process::exit(install::uninstall());
    }

    if cli.configtest {
        std::process::exit(configtest(&cli.config));
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("fswatchd: failed to start async runtime: {err}");
            std::process::exit(1);
        }
    };

    std::process::exit(runtime.block_on(run(cli)));
}

fn configtest(config: &std::path::Path) -> i32 {
    match RawConfig::from_file(config).and_then(RawConfig::into_daemon) {
        Ok(daemon) => {
            println!("fswatchd: {} ok ({} watch(es))", config.display(), daemon.watch_count());
            0
        }
        Err(err) => {
            eprintln!("fswatchd: {err}");
            1
        }
    }
}

/// Load the config, start the daemon, and drive its lifecycle from
/// `SIGINT`/`SIGTERM`/`SIGHUP` until shutdown (spec §4.7, §6).
async fn run(cli: Cli) -> i32 {
    init_logging(cli.debug);

    let daemon = match RawConfig::from_file(&cli.config).and_then(RawConfig::into_daemon) {
        Ok(daemon) => daemon,
        Err(err) => {
            error!(%err, "failed to load config");
            return 1;
        }
    };

    if let Err(err) = daemon.start() {
        error!(%err, "failed to start daemon");
        return 1;
    }

    let handle = Arc::new(DaemonHandle::new(daemon, cli.config.clone()));

    let (mut sigterm, mut sigint, mut sighup) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
        signal(SignalKind::hangup()),
    ) {
        (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
        (Err(err), ..) | (_, Err(err), _) | (.., Err(err)) => {
            error!(%err, "failed to install signal handlers");
            return 1;
        }
    };

    info!("fswatchd ready");

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
            _ = sighup.recv() => {
                info!("received SIGHUP, reloading");
                let handle = Arc::clone(&handle);
                tokio::spawn(async move {
                    if let Err(err) = handle.reload().await {
                        error!(%err, "reload failed");
                    }
                });
            }
        }
    }

    handle.current().shutdown().await;
    0
}
