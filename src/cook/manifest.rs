// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Packaging manifest written after a successful install.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::install::InstallReport;
use crate::recipe::{Hooks, Recipe, RecipeMetadata, SourceSpec};

/// Everything a packaging tool needs besides the staged tree itself.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub package: RecipeMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSpec>,
    pub dependencies: Vec<String>,
    pub hooks: Hooks,
    pub report: InstallReport,
}

impl Manifest {
    #[must_use]
    pub fn new(recipe: &Recipe, dependencies: Vec<String>, report: InstallReport) -> Self {
        Self {
            package: recipe.package.clone(),
            source: recipe.source.clone(),
            dependencies,
            hooks: recipe.hooks.clone(),
            report,
        }
    }

    /// `<full name>.json`, the file name used inside a manifests directory.
    #[must_use]
    pub fn file_name(&self) -> PathBuf {
        PathBuf::from(format!("{}.json", self.package.full_name()))
    }

    /// Renders the manifest as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize manifest")
    }

    /// Writes the manifest to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written.
    pub async fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json = self.to_json()?;
        tokio::fs::write(path, json + "\n")
            .await
            .with_context(|| format!("failed to write manifest {}", path.display()))?;

        info!(path = %path.display(), "wrote manifest");
        Ok(())
    }
}
