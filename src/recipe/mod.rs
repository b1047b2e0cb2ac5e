// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recipe declarations.
//!
//! # Recipe Layout
//!
//! ```text
//! [package]        name, version, revision, homepage, arch, section
//! [source]         url, with = git | http | local
//! [dependencies]   requires, default_groups, groups.<name>
//! [hooks]          before_install, after_install, before_remove, after_remove
//! [[install]]      kind, source, dest   (declaration order kept)
//! ```
//!
//! # Example
//!
//! ```toml
//! [package]
//! name = "pulp-win-plugins-admin"
//! version = "0.1"
//!
//! [[install]]
//! kind = "copy-tree"
//! source = "admin"
//! dest = "%(lib)s/pulp/admin"
//! ```

pub mod deps;
pub mod directive;
pub mod metadata;


use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::types::LayoutConfig;
use crate::error::RecipeError;
use crate::install::InstallRule;

pub use deps::{Dependencies, RecipeOptions};
pub use directive::Directive;
pub use metadata::{FetchMethod, Hooks, RecipeMetadata, SourceSpec};

/// A parsed recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    pub package: RecipeMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSpec>,
    #[serde(default)]
    pub dependencies: Dependencies,
    #[serde(default)]
    pub hooks: Hooks,
    #[serde(default)]
    pub install: Vec<Directive>,
}

impl Recipe {
    /// Reads and validates a recipe file.
    ///
    /// # Errors
    ///
    /// `RecipeError::ReadError` if the file cannot be read, otherwise see
    /// [`Recipe::parse`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecipeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RecipeError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        let recipe = Self::parse(&content)?;
        debug!(
            recipe = %recipe.package.name,
            path = %path.display(),
            directives = recipe.install.len(),
            "loaded recipe"
        );
        Ok(recipe)
    }

    /// Parses and validates a recipe from TOML text.
    ///
    /// # Errors
    ///
    /// `RecipeError::Parse` for malformed TOML or unknown fields,
    /// `RecipeError::InvalidField` when [`Recipe::validate`] fails.
    pub fn parse(content: &str) -> Result<Self, RecipeError> {
        let recipe: Self =
            toml::from_str(content).map_err(|e| RecipeError::Parse(e.to_string()))?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Checks metadata, directives and dependency group declarations.
    ///
    /// # Errors
    ///
    /// `RecipeError::InvalidField` naming the first offending field, or
    /// `RecipeError::UnknownGroup` for a default group that is not declared.
    pub fn validate(&self) -> Result<(), RecipeError> {
        self.package.validate()?;

        if self.install.is_empty() {
            return Err(metadata::invalid(
                "install",
                "a recipe needs at least one [[install]] directive",
            ));
        }
        for (index, directive) in self.install.iter().enumerate() {
            directive.validate(index)?;
        }

        for group in &self.dependencies.default_groups {
            if !self.dependencies.groups.contains_key(group) {
                return Err(RecipeError::UnknownGroup {
                    recipe: self.package.name.clone(),
                    group: group.clone(),
                });
            }
        }
        Ok(())
    }

    /// Substitution variables for `dest`: the layout plus `name`,
    /// `version`, `revision` and `arch`.
    #[must_use]
    pub fn variables<'a>(&'a self, layout: &'a LayoutConfig) -> BTreeMap<&'static str, &'a str> {
        let mut vars = layout.variables();
        vars.insert("name", &self.package.name);
        vars.insert("version", &self.package.version);
        vars.insert("revision", &self.package.revision);
        vars.insert("arch", &self.package.arch);
        vars
    }

    /// Builds the install rules in declaration order.
    ///
    /// # Errors
    ///
    /// `RecipeError::UnknownVariable` when a `dest` names an undefined
    /// variable.
    pub fn rules(&self, layout: &LayoutConfig) -> Result<Vec<InstallRule>, RecipeError> {
        let vars = self.variables(layout);
        self.install
            .iter()
            .map(|directive| directive.to_rule(&vars))
            .collect()
    }

    /// Resolved dependency list for the given group selection.
    ///
    /// # Errors
    ///
    /// `RecipeError::UnknownGroup` when a selected group is not declared.
    pub fn dependencies(&self, options: &RecipeOptions) -> Result<Vec<String>, RecipeError> {
        self.dependencies.resolve(&self.package.name, options)
    }
}
