// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Check command: verifies a checkout has every source a recipe copies.

use crate::cli::recipe::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::install::Installer;
use crate::recipe::Recipe;

/// Handler for the check command.
///
/// # Errors
///
/// Returns an error if the recipe cannot be loaded, `paths.source` is not
/// configured, or a source is missing.
pub async fn run_check_command(args: &CheckArgs, config: &Config) -> Result<()> {
    let recipe = Recipe::from_file(&args.recipe)?;
    let rules = recipe.rules(&config.layout)?;
    let source = config.paths.source()?;

    let installer = Installer::builder()
        .source_root(source)
        .dest_root(config.paths.staging.clone().unwrap_or_default())
        .build();
    installer.check(&rules).await?;

    println!(
        "{}: {} rules, all sources present in {}",
        recipe.package.name,
        rules.len(),
        source.display()
    );
    Ok(())
}
