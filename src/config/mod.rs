// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for cook-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. cook.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. COOK_* env vars
//! 5. --set section/key=value
//! 6. CLI flags (--dry, --staging, --with, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! COOK_GLOBAL__DRY=true           → global.dry = true
//! COOK_PATHS__STAGING=/tmp/stage  → paths.staging = "/tmp/stage"
//! COOK_LAYOUT__LIB=/usr/lib64     → layout.lib = "/usr/lib64"
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, InstallConfig, LayoutConfig, RecipeConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Working directories.
    pub paths: PathsConfig,
    /// Target filesystem layout.
    pub layout: LayoutConfig,
    /// Recipe options.
    pub recipe: RecipeConfig,
    /// Installer behavior.
    pub install: InstallConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cook_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("cook.toml")
    ///     .add_toml_file_optional("cook.local.toml")
    ///     .with_env_prefix("COOK")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve derived values after all sources are merged.
    pub fn resolve(&mut self) {
        self.paths.resolve();
    }

    /// Format configuration options for display, one `key = value` per line,
    /// sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_layout_options(&mut options);
        self.format_recipe_options(&mut options);
        self.format_install_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_deref()));
        options.insert(
            "global.log_format".into(),
            format!("{:?}", self.global.log_format).to_lowercase(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.prefix".into(), fmt_path(self.paths.prefix.as_deref()));
        options.insert("paths.source".into(), fmt_path(self.paths.source.as_deref()));
        options.insert("paths.staging".into(), fmt_path(self.paths.staging.as_deref()));
        options.insert("paths.manifests".into(), fmt_path(self.paths.manifests.as_deref()));
    }

    fn format_layout_options(&self, options: &mut BTreeMap<String, String>) {
        for (name, value) in self.layout.variables() {
            options.insert(format!("layout.{name}"), value.to_string());
        }
    }

    fn format_recipe_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("recipe.with".into(), self.recipe.with.join(", "));
    }

    fn format_install_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("install.clean".into(), self.install.clean.to_string());
        options.insert(
            "install.preserve_mode".into(),
            self.install.preserve_mode.to_string(),
        );
        options.insert(
            "install.follow_links".into(),
            self.install.follow_links.to_string(),
        );
        options.insert(
            "install.skip_dirs".into(),
            self.install.skip_dirs.join(", "),
        );
    }
}

fn fmt_path(path: Option<&Path>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
