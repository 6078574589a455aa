// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--install`/`--uninstall`: copy/remove the bundled systemd unit file
//! (spec §6, SPEC_FULL.md §9 supplement, grounded on
//! `examples/original_source/pyinotifyd/install.py`).

use std::path::Path;

use nix::unistd::Uid;

const UNIT_FILE: &str = include_str!("../systemd/fswatchd.service");
const UNIT_PATH: &str = "/usr/lib/systemd/system/fswatchd.service";
const CONFIG_DIR: &str = "/etc/fswatchd";

fn require_root() -> Option<i32> {
    if Uid::effective().is_root() {
        None
    } else {
        eprintln!("fswatchd: --install/--uninstall requires root privileges");
        Some(2)
    }
}

pub fn install() -> i32 {
    if let Some(code) = require_root() {
        return code;
    }

    if let Err(err) = std::fs::write(UNIT_PATH, UNIT_FILE) {
        eprintln!("fswatchd: unable to install {UNIT_PATH}: {err}");
        return 3;
    }
    println!("installed {UNIT_PATH}");

    if !Path::new(CONFIG_DIR).is_dir() {
        if let Err(err) = std::fs::create_dir_all(CONFIG_DIR) {
            eprintln!("fswatchd: unable to create {CONFIG_DIR}: {err}");
            return 3;
        }
        println!("created {CONFIG_DIR}");
    }

    0
}

pub fn uninstall() -> i32 {
    if let Some(code) = require_root() {
        return code;
    }

    match std::fs::remove_file(UNIT_PATH) {
        Ok(()) => {
            println!("removed {UNIT_PATH}");
            0
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            println!("{UNIT_PATH} is not installed");
            0
        }
        Err(err) => {
            eprintln!("fswatchd: unable to remove {UNIT_PATH}: {err}");
            3
        }
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
