// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Show command: a recipe as it would be installed.

use anyhow::Context;
use serde::Serialize;

use crate::cli::recipe::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::install::InstallRule;
use crate::recipe::{Hooks, Recipe, RecipeMetadata, RecipeOptions, SourceSpec};

/// A recipe with its rules and dependencies resolved.
#[derive(Debug, Serialize)]
pub struct ResolvedRecipe<'a> {
    pub package: &'a RecipeMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a SourceSpec>,
    pub dependencies: Vec<String>,
    pub hooks: &'a Hooks,
    pub rules: Vec<InstallRule>,
}

impl<'a> ResolvedRecipe<'a> {
    /// Resolves `recipe` against the configured layout.
    ///
    /// # Errors
    ///
    /// Returns an error if a destination uses an unknown variable or a
    /// selected dependency group does not exist.
    pub fn new(recipe: &'a Recipe, config: &Config, options: &RecipeOptions) -> Result<Self> {
        Ok(Self {
            package: &recipe.package,
            source: recipe.source.as_ref(),
            dependencies: recipe.dependencies(options)?,
            hooks: &recipe.hooks,
            rules: recipe.rules(&config.layout)?,
        })
    }

    /// Text rendering, one item per line.
    #[must_use]
    pub fn format_lines(&self) -> Vec<String> {
        let package = self.package;
        let mut lines = vec![format!("{} ({})", package.name, package.full_name())];
        if !package.description.is_empty() {
            lines.push(format!("  description: {}", package.description));
        }
        if !package.homepage.is_empty() {
            lines.push(format!("  homepage:    {}", package.homepage));
        }
        if !package.section.is_empty() {
            lines.push(format!("  section:     {}", package.section));
        }
        if let Some(source) = self.source {
            lines.push(format!("  source:      {} (with {})", source.url, source.with));
        }

        lines.push("dependencies:".to_string());
        if self.dependencies.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(self.dependencies.iter().map(|d| format!("  {d}")));

        let hooks: Vec<_> = self.hooks.iter().collect();
        if !hooks.is_empty() {
            lines.push("hooks:".to_string());
            lines.extend(hooks.iter().map(|(name, script)| format!("  {name}: {script}")));
        }

        lines.push("rules:".to_string());
        lines.extend(
            self.rules
                .iter()
                .enumerate()
                .map(|(i, rule)| format!("  {}. {rule}", i + 1)),
        );
        lines
    }
}

/// Handler for the show command.
///
/// # Errors
///
/// Returns an error if the recipe cannot be loaded or resolved.
pub fn run_show_command(args: &ShowArgs, config: &Config) -> Result<()> {
    let recipe = Recipe::from_file(&args.recipe)?;
    let options = args.groups.to_options(&config.recipe.with);
    let resolved = ResolvedRecipe::new(&recipe, config, &options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&resolved).context("failed to serialize recipe")?;
        println!("{json}");
    } else {
        for line in resolved.format_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
