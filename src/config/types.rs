// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for cook-rs.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, LayoutConfig, RecipeConfig, InstallConfig
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::{LogFormat, LogLevel};

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log every rule but write nothing.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file log when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Line format of the log file.
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Target filesystem layout used to expand `%(lib)s`-style variables in
/// install destinations.
///
/// Values are absolute paths of the target system; they are re-rooted under
/// the staging directory at install time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub prefix: String,
    pub lib: String,
    pub etc: String,
    pub var: String,
    pub share: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            prefix: "/usr".to_string(),
            lib: "/usr/lib".to_string(),
            etc: "/etc".to_string(),
            var: "/var".to_string(),
            share: "/usr/share".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Returns the layout as substitution variables keyed by name.
    #[must_use]
    pub fn variables(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            ("prefix", self.prefix.as_str()),
            ("lib", self.lib.as_str()),
            ("etc", self.etc.as_str()),
            ("var", self.var.as_str()),
            ("share", self.share.as_str()),
        ])
    }
}

/// Recipe selection options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecipeConfig {
    /// Optional dependency groups to enable, e.g. `["python"]`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub with: Vec<String>,
}

/// Installer behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Remove the staging root before installing.
    pub clean: bool,
    /// Copy permission bits along with file contents.
    pub preserve_mode: bool,
    /// Copy the targets of symlinks instead of the links themselves.
    pub follow_links: bool,
    /// Directory names never descended into by tree copies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip_dirs: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            clean: false,
            preserve_mode: true,
            follow_links: false,
            skip_dirs: Vec::new(),
        }
    }
}
