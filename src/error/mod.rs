// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Result      application paths, with context
//!      ^
//!      |  each sub-error stays reachable through downcast_ref
//!      |
//! Install  SourceNotFound, DestinationUnwritable, Interrupted
//! Recipe   ReadError, Parse, InvalidField, UnknownVariable, UnknownGroup
//! Config   ParseError, MissingKey, InvalidValue
//! Fs       NotFound, PermissionDenied, IoError
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type for the installer core.
pub type InstallResult<T> = std::result::Result<T, InstallError>;

// --- Install Errors ---

/// Failures of the installer core.
///
/// Every variant aborts the whole install. Rules applied before the failing
/// one are left in the staging tree.
#[derive(Debug, Error)]
pub enum InstallError {
    /// A copy rule's source path does not exist (or is not usable).
    #[error("source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A destination directory or file could not be created or written.
    #[error("destination unwritable: {}: {source}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Install was cancelled between rules.
    #[error("install interrupted before rule {index}")]
    Interrupted { index: usize },
}

impl InstallError {
    pub(crate) fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    pub(crate) fn unwritable(path: &Path, source: std::io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true for [`InstallError::SourceNotFound`].
    #[must_use]
    pub const fn is_source_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }

    /// Returns true for [`InstallError::DestinationUnwritable`].
    #[must_use]
    pub const fn is_destination_unwritable(&self) -> bool {
        matches!(self, Self::DestinationUnwritable { .. })
    }
}

// --- Recipe Errors ---

/// Recipe loading and validation errors.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Failed to read the recipe file.
    #[error("failed to read recipe '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The recipe is not valid TOML or does not match the recipe layout.
    #[error("failed to parse recipe: {0}")]
    Parse(String),

    /// A field holds a value the recipe format rejects.
    #[error("invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// A destination refers to a `%(name)s` variable that is not defined.
    #[error("unknown variable '%({name})s' in '{template}'")]
    UnknownVariable { name: String, template: String },

    /// A dependency group was enabled but the recipe does not declare it.
    #[error("recipe '{recipe}' has no dependency group '{group}'")]
    UnknownGroup { recipe: String, group: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classifies an I/O error raised while touching `path`.
    #[must_use]
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(path.display().to_string())
            }
            _ => Self::IoError {
                path: path.display().to_string(),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests;
