// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Rule`: an immutable regex-and-action record for the file-manager
//! specialization (spec §3, §4.3).

use std::path::{Path, PathBuf};

use fsw_core::ConfigError;
use regex::Regex;

/// What a matched rule does to the path it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copy,
    Move,
    Delete,
}

/// A single regex-matched file-management rule (spec §3 "Rule").
///
/// `src_re`/`dst_re` are matched/evaluated against the *whole* event
/// pathname; `dst_re` is a regex-replacement template used only by
/// `Copy`/`Move` (`Delete` ignores it).
pub struct Rule {
    pub action: Action,
    pub src_re: Regex,
    dst_re: String,
    pub auto_create: bool,
    pub rec: bool,
    pub dirmode: Option<u32>,
    pub filemode: Option<u32>,
    pub user: Option<String>,
    pub group: Option<String>,
}

impl Rule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        action: Action,
        src_re: &str,
        dst_re: impl Into<String>,
        auto_create: bool,
        rec: bool,
        dirmode: Option<u32>,
        filemode: Option<u32>,
        user: Option<String>,
        group: Option<String>,
    ) -> Result<Self, ConfigError> {
        let src_re = Regex::new(src_re).map_err(|source| ConfigError::BadRegex {
            pattern: src_re.to_string(),
            source,
        })?;
        Ok(Self {
            action,
            src_re,
            dst_re: translate_python_backrefs(&dst_re.into()),
            auto_create,
            rec,
            dirmode,
            filemode,
            user,
            group,
        })
    }

    /// Whether this rule's `src_re` matches `path` (spec §4.3 "first
    /// matching rule by linear scan").
    pub fn matches(&self, path: &Path) -> bool {
        self.src_re.is_match(&path.to_string_lossy())
    }

    /// Compute the destination path via regex substitution with
    /// backreferences (spec §4.3, §8 invariant 8).
    ///
    /// The original implementation's config (`examples/original_source/`)
    /// writes Python `re.sub` templates like `\g<p>.done`; `Rule::new`
    /// translates those into the `regex` crate's native `${name}`/`$N`
    /// replacement syntax once at construction, so this method is a plain
    /// `Regex::replace`.
    pub fn substitute(&self, path: &Path) -> PathBuf {
        let src = path.to_string_lossy();
        PathBuf::from(self.src_re.replace(&src, self.dst_re.as_str()).into_owned())
    }
}

/// Translate Python `re.sub`-style backreferences into the `regex` crate's
/// native replacement syntax: `\g<name>` / `\g<7>` -> `${name}` / `${7}`,
/// and bare `\N` -> `$N`. Only these two forms appear in
/// `examples/original_source/`'s shipped rule configs; anything else in
/// `dst_re` passes through unchanged.
fn translate_python_backrefs(tpl: &str) -> String {
    let chars: Vec<char> = tpl.chars().collect();
    let mut out = String::with_capacity(tpl.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            if chars[i + 1] == 'g' && chars.get(i + 2) == Some(&'<') {
                if let Some(rel_end) = chars[i + 3..].iter().position(|&c| c == '>') {
                    let name: String = chars[i + 3..i + 3 + rel_end].iter().collect();
                    out.push_str("${");
                    out.push_str(&name);
                    out.push('}');
                    i += 3 + rel_end + 1;
                    continue;
                }
            } else if chars[i + 1].is_ascii_digit() {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].is_ascii_digit() {
                    end += 1;
                }
                out.push('$');
                out.extend(chars[start..end].iter().copied());
                i = end;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
