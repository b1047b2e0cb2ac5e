// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for cook-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! cook [global options] <command>
//! version
//! options
//! inis
//! install RECIPE
//! show RECIPE
//! check RECIPE
//! ```

pub mod global;
pub mod recipe;


use crate::cli::global::GlobalOptions;
use crate::cli::recipe::{CheckArgs, InstallArgs, ShowArgs};
use clap::{Parser, Subcommand};

/// Recipe-driven staging installer.
#[derive(Debug, Parser)]
#[command(
    name = "cook",
    author,
    version,
    about = "Recipe-driven staging installer",
    long_about = "cook-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Stages the files of a package recipe into a directory that\n\
                  mirrors the target filesystem, ready for packaging.\n\n\
                  `cook install recipe.toml --source src --staging tmp-dest`\n\
                  copies every [[install]] directive in order. See\n\
                  `cook <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  cook reads `cook.toml` from the current directory if it exists,\n\
                  then every --ini file in order, then COOK_<SECTION>__<KEY>\n\
                  environment variables, then --set overrides. Use\n\
                  --no-default-inis to skip `cook.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used by cook.
    Inis,

    /// Runs a recipe's build and install phases into the staging root.
    Install(InstallArgs),

    /// Prints a recipe's metadata, dependencies and resolved rules.
    Show(ShowArgs),

    /// Verifies that every source a recipe copies exists.
    Check(CheckArgs),
}

impl Cli {
    /// Global overrides followed by the command's path arguments.
    #[must_use]
    pub fn config_overrides(&self) -> Vec<String> {
        let mut overrides = self.global.to_config_overrides();
        match &self.command {
            Some(Command::Install(args)) => overrides.extend(recipe::path_overrides(
                args.source.as_ref(),
                args.staging.as_ref(),
            )),
            Some(Command::Check(args)) => {
                overrides.extend(recipe::path_overrides(args.source.as_ref(), None));
            }
            _ => {}
        }
        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
