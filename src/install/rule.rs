// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install rules and their path checks.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InstallError, InstallResult};

/// What an [`InstallRule`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Copy a directory tree; the destination receives the tree's contents.
    CopyTree,
    /// Copy one file into the destination directory, keeping its name.
    CopyFile,
    /// Create the destination directory; nothing is copied.
    #[serde(rename = "mkdir")]
    CreateEmptyDir,
}

impl RuleKind {
    /// Whether the kind reads from the source checkout.
    #[must_use]
    pub const fn needs_source(self) -> bool {
        !matches!(self, Self::CreateEmptyDir)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CopyTree => "copy-tree",
            Self::CopyFile => "copy-file",
            Self::CreateEmptyDir => "mkdir",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One copy-or-create directive.
///
/// `source_path` is relative to the source checkout. `destination_path` is
/// an absolute path of the target system; it is re-rooted under the staging
/// directory when applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRule {
    kind: RuleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_path: Option<PathBuf>,
    destination_path: PathBuf,
}

impl InstallRule {
    /// Copies the tree at `source` so that `destination` mirrors it.
    pub fn copy_tree(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            kind: RuleKind::CopyTree,
            source_path: Some(source.into()),
            destination_path: destination.into(),
        }
    }

    /// Copies the file at `source` into the directory `destination`.
    pub fn copy_file(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            kind: RuleKind::CopyFile,
            source_path: Some(source.into()),
            destination_path: destination.into(),
        }
    }

    /// Creates `destination` and its parents.
    pub fn create_empty_dir(destination: impl Into<PathBuf>) -> Self {
        Self {
            kind: RuleKind::CreateEmptyDir,
            source_path: None,
            destination_path: destination.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    /// Resolves the source under `source_root`.
    ///
    /// # Errors
    ///
    /// `SourceNotFound` when the rule has no source, or the source is absolute
    /// or climbs out of the checkout with `..`.
    pub fn resolve_source(&self, source_root: &Path) -> InstallResult<PathBuf> {
        let source = self
            .source_path
            .as_deref()
            .ok_or_else(|| InstallError::source_not_found(source_root))?;

        if !is_contained(source) || source.is_absolute() {
            return Err(InstallError::source_not_found(source));
        }
        Ok(source_root.join(source))
    }

    /// Re-roots the destination under `dest_root`.
    ///
    /// Leading `/` (and, on Windows, drive prefixes) are dropped.
    ///
    /// # Errors
    ///
    /// `DestinationUnwritable` when the destination contains `..`.
    pub fn resolve_destination(&self, dest_root: &Path) -> InstallResult<PathBuf> {
        if !is_contained(&self.destination_path) {
            return Err(InstallError::unwritable(
                &self.destination_path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "destination escapes the staging root",
                ),
            ));
        }

        let relative: PathBuf = self
            .destination_path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        Ok(dest_root.join(relative))
    }
}

impl std::fmt::Display for InstallRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source_path {
            Some(source) => write!(
                f,
                "{} {} -> {}",
                self.kind,
                source.display(),
                self.destination_path.display()
            ),
            None => write!(f, "{} {}", self.kind, self.destination_path.display()),
        }
    }
}

/// True when `path` has no `..` component.
pub(crate) fn is_contained(path: &Path) -> bool {
    !path.components().any(|c| matches!(c, Component::ParentDir))
}
