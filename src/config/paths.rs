// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! prefix/
//!   source/     (recipe checkout)
//!   tmp-dest/   (staging root)
//!   pkg/        (manifests)
//! ```
//!
//! All paths are optional. Relative paths and missing values are resolved
//! from `prefix` when it is set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Working directories of a cook run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Base directory for the other paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
    /// Recipe checkout that install sources are relative to (default: prefix/source).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Staging root mirroring the target filesystem (default: prefix/tmp-dest).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<PathBuf>,
    /// Directory receiving manifests (default: prefix/pkg).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifests: Option<PathBuf>,
}

impl PathsConfig {
    /// Resolve relative paths against `prefix` and fill in defaults.
    ///
    /// Does nothing when `prefix` is unset.
    pub fn resolve(&mut self) {
        let Some(prefix) = self.prefix.clone() else {
            return;
        };

        let resolve = |path: &mut Option<PathBuf>, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(prefix.join(&*p));
            }
            None => {
                *path = Some(prefix.join(default));
            }
            _ => {}
        };

        resolve(&mut self.source, "source");
        resolve(&mut self.staging, "tmp-dest");
        resolve(&mut self.manifests, "pkg");
    }

    /// Returns the source checkout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when neither `paths.source` nor
    /// `paths.prefix` is set.
    pub fn source(&self) -> Result<&Path> {
        Self::required(self.source.as_deref(), "source")
    }

    /// Returns the staging root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when neither `paths.staging` nor
    /// `paths.prefix` is set.
    pub fn staging(&self) -> Result<&Path> {
        Self::required(self.staging.as_deref(), "staging")
    }

    fn required<'a>(path: Option<&'a Path>, key: &str) -> Result<&'a Path> {
        path.ok_or_else(|| {
            ConfigError::MissingKey {
                section: "paths".to_string(),
                key: key.to_string(),
            }
            .into()
        })
    }
}
