// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Descriptive recipe fields.
//!
//! Nothing here drives the install; the values are validated, substituted
//! into destinations (`%(name)s`, `%(version)s`) and copied to the manifest.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

fn package_name_pattern() -> Result<&'static Regex, RecipeError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9+.\-]*$"))
        .as_ref()
        .map_err(|e| invalid("package.name", format!("name pattern failed to compile: {e}")))
}

/// `[package]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub version: String,
    #[serde(default = "default_revision")]
    pub revision: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub homepage: String,
    #[serde(default = "default_arch", alias = "architecture")]
    pub arch: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub section: String,
}

fn default_revision() -> String {
    "1".to_string()
}

fn default_arch() -> String {
    "noarch".to_string()
}

impl RecipeMetadata {
    /// Checks the fields packaging tools are strict about.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::InvalidField` naming the first offending field.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if !package_name_pattern()?.is_match(&self.name) {
            return Err(invalid(
                "package.name",
                format!(
                    "'{}' must be lowercase alphanumerics, '+', '-' or '.', starting with an alphanumeric",
                    self.name
                ),
            ));
        }
        for (field, value) in [
            ("package.version", &self.version),
            ("package.revision", &self.revision),
            ("package.arch", &self.arch),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(invalid(
                    field,
                    format!("'{value}' must be non-empty without whitespace"),
                ));
            }
        }
        Ok(())
    }

    /// `<name>-<version>-<revision>.<arch>`, the usual package file stem.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{}-{}-{}.{}",
            self.name, self.version, self.revision, self.arch
        )
    }
}

/// How the surrounding tool obtains the source checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMethod {
    Git,
    #[default]
    Http,
    Local,
}

impl std::fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Git => write!(f, "git"),
            Self::Http => write!(f, "http"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    pub url: String,
    #[serde(default)]
    pub with: FetchMethod,
}

/// `[hooks]` section. Scripts are recorded for the packaging tool and
/// never run here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hooks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_install: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_install: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_remove: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_remove: Option<String>,
}

impl Hooks {
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("before_install", self.before_install.as_deref()),
            ("after_install", self.after_install.as_deref()),
            ("before_remove", self.before_remove.as_deref()),
            ("after_remove", self.after_remove.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, script)| script.map(|s| (name, s)))
    }
}

pub(super) fn invalid(field: &str, message: impl Into<String>) -> RecipeError {
    RecipeError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}
