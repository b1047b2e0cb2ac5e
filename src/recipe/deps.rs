// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package dependencies and optional dependency groups.
//!
//! ```text
//! requires         always emitted
//! default_groups   enabled unless --without
//! groups.<name>    enabled by --with <name> or [recipe] with = [..]
//! ```

use std::collections::{BTreeMap, HashSet};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// `[dependencies]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dependencies {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_groups: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<String, Vec<String>>,
}

/// Which optional dependency groups to enable.
#[derive(Debug, Clone, Default, Builder)]
pub struct RecipeOptions {
    #[builder(setters(name = with_groups), default)]
    with: Vec<String>,
    #[builder(setters(name = without_groups), default)]
    without: Vec<String>,
}

impl RecipeOptions {
    #[must_use]
    pub fn with(&self) -> &[String] {
        &self.with
    }

    #[must_use]
    pub fn without(&self) -> &[String] {
        &self.without
    }
}

impl Dependencies {
    /// Names of the enabled groups, in enabling order.
    ///
    /// Defaults come first, then explicit `with` groups. `without` wins over
    /// both.
    ///
    /// # Errors
    ///
    /// `RecipeError::UnknownGroup` when `with` or `without` names a group the
    /// recipe does not declare.
    pub fn enabled_groups<'a>(
        &'a self,
        recipe: &str,
        options: &'a RecipeOptions,
    ) -> Result<Vec<&'a str>, RecipeError> {
        for group in options.with().iter().chain(options.without()) {
            if !self.groups.contains_key(group) {
                return Err(RecipeError::UnknownGroup {
                    recipe: recipe.to_string(),
                    group: group.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        Ok(self
            .default_groups
            .iter()
            .chain(options.with())
            .map(String::as_str)
            .filter(|g| !options.without().iter().any(|w| w.as_str() == *g))
            .filter(|g| seen.insert(*g))
            .collect())
    }

    /// `requires` followed by each enabled group, deduplicated, first
    /// occurrence kept.
    ///
    /// # Errors
    ///
    /// See [`Dependencies::enabled_groups`].
    pub fn resolve(&self, recipe: &str, options: &RecipeOptions) -> Result<Vec<String>, RecipeError> {
        let enabled = self.enabled_groups(recipe, options)?;

        let mut seen = HashSet::new();
        let groups = enabled
            .iter()
            .filter_map(|g| self.groups.get(*g))
            .flatten();

        Ok(self
            .requires
            .iter()
            .chain(groups)
            .filter(|dep| seen.insert(dep.as_str()))
            .cloned()
            .collect())
    }
}
