// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the recipe commands.
//!
//! ```text
//! install RECIPE [--source DIR] [--staging DIR] [--clean] [--with G].. [--without G].. [--manifest FILE]
//! show    RECIPE [--with G].. [--without G].. [--json]
//! check   RECIPE [--source DIR]
//! ```
//!
//! `--source` and `--staging` override `paths.source` and `paths.staging`.

use clap::{ArgAction, Args};
use std::path::PathBuf;

use crate::recipe::RecipeOptions;

/// Dependency group selection.
#[derive(Debug, Clone, Default, Args)]
pub struct GroupArgs {
    /// Enables an optional dependency group. Can be repeated.
    #[arg(short = 'w', long = "with", value_name = "GROUP", action = ArgAction::Append)]
    pub with: Vec<String>,

    /// Disables a dependency group, including default ones. Can be repeated.
    #[arg(long = "without", value_name = "GROUP", action = ArgAction::Append)]
    pub without: Vec<String>,
}

impl GroupArgs {
    /// Builds recipe options; `configured` groups come from `[recipe] with`.
    #[must_use]
    pub fn to_options(&self, configured: &[String]) -> RecipeOptions {
        let with = configured
            .iter()
            .chain(&self.with)
            .cloned()
            .collect::<Vec<_>>();
        RecipeOptions::builder()
            .with_groups(with)
            .without_groups(self.without.clone())
            .build()
    }
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    /// Recipe file.
    #[arg(value_name = "RECIPE")]
    pub recipe: PathBuf,

    /// Source checkout the recipe's sources are relative to.
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Staging root mirroring the target filesystem.
    #[arg(long, value_name = "DIR")]
    pub staging: Option<PathBuf>,

    /// Deletes the staging root before installing.
    #[arg(short = 'c', long)]
    pub clean: bool,

    #[command(flatten)]
    pub groups: GroupArgs,

    /// Writes the packaging manifest to FILE. Defaults to
    /// `paths.manifests/<name>-<version>-<revision>.<arch>.json` when
    /// `paths.manifests` is set.
    #[arg(short = 'm', long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Recipe file.
    #[arg(value_name = "RECIPE")]
    pub recipe: PathBuf,

    #[command(flatten)]
    pub groups: GroupArgs,

    /// Prints JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Recipe file.
    #[arg(value_name = "RECIPE")]
    pub recipe: PathBuf,

    /// Source checkout the recipe's sources are relative to.
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,
}

/// `paths/<key>=<value>` overrides for the path arguments that were given.
pub(crate) fn path_overrides(source: Option<&PathBuf>, staging: Option<&PathBuf>) -> Vec<String> {
    let mut overrides = Vec::new();
    if let Some(source) = source {
        overrides.push(format!("paths/source={}", source.display()));
    }
    if let Some(staging) = staging {
        overrides.push(format!("paths/staging={}", staging.display()));
    }
    overrides
}
