// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recipe cooking: the phases around a single install pass.
//!
//! ```text
//! Recipe + RecipeOptions
//!      |  rules(layout), dependencies(options)
//!      v
//!   Phase::Build     no-op for copy-only recipes
//!      |
//!   [clean]          remove staging root (optional)
//!      |
//!   Phase::Install   Installer (cancel token, dry run)
//!      v
//!   Manifest
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Phase`] | Build then Install |
//! | [`CookContext`] | Config, cancellation token and run flags |
//! | [`Manifest`] | What was staged, for the packaging step |

pub mod manifest;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::config::types::InstallConfig;
use crate::error::{ConfigError, FsError, Result};
use crate::install::Installer;
use crate::recipe::{Recipe, RecipeOptions};
use crate::utility::fs::copy::{CopyFlags, CopyOptions};

pub use manifest::Manifest;

/// Cook phase, run in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Build phase: nothing to compile for copy-only recipes.
    Build,
    /// Install phase: apply the recipe's rules to the staging root.
    Install,
}

impl Phase {
    /// Returns all phases in execution order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Build, Self::Install]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Install => "install",
        }
    }
}

/// Context for one cook run.
#[derive(Clone)]
pub struct CookContext {
    config: Arc<Config>,
    cancel_token: CancellationToken,
    dry_run: bool,
    clean: bool,
}

impl CookContext {
    /// Creates a context; dry run and clean start from the configuration.
    #[must_use]
    pub fn new(config: Arc<Config>, cancel_token: CancellationToken) -> Self {
        let dry_run = config.global.dry;
        let clean = config.install.clean;
        Self {
            config,
            cancel_token,
            dry_run,
            clean,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn do_clean(&self) -> bool {
        self.clean
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Copy options derived from the `[install]` section.
#[must_use]
pub fn copy_options(install: &InstallConfig) -> CopyOptions {
    let mut flags = CopyFlags::empty();
    flags.set(CopyFlags::PRESERVE_MODE, install.preserve_mode);
    flags.set(CopyFlags::FOLLOW_LINKS, install.follow_links);

    CopyOptions::builder()
        .with_flags(flags)
        .with_skip_dirs(install.skip_dirs.clone())
        .build()
}

/// Runs the build and install phases of `recipe`.
///
/// Source and staging roots come from `ctx.config().paths`.
///
/// # Errors
///
/// Returns an error if:
/// - `paths.source` or `paths.staging` is not configured.
/// - The recipe's rules or dependencies cannot be resolved.
/// - Cleaning the staging root fails or would delete the checkout.
/// - The install fails; the [`crate::error::InstallError`] stays reachable
///   through `downcast_ref`.
pub async fn cook(recipe: &Recipe, ctx: &CookContext, options: &RecipeOptions) -> Result<Manifest> {
    let config = ctx.config();
    let source = config.paths.source()?;
    let staging = config.paths.staging()?;

    let mut rules = recipe.rules(&config.layout)?;
    let dependencies = recipe.dependencies(options)?;
    let name = recipe.package.full_name();

    let mut report = None;
    for phase in Phase::all() {
        match phase {
            Phase::Build => {
                debug!(recipe = %name, phase = phase.name(), "nothing to build");
            }
            Phase::Install => {
                if ctx.do_clean() {
                    clean_staging(staging, source, ctx.is_dry_run()).await?;
                }

                info!(
                    recipe = %name,
                    source = %source.display(),
                    staging = %staging.display(),
                    rules = rules.len(),
                    "installing"
                );

                let installer = Installer::builder()
                    .source_root(source)
                    .dest_root(staging)
                    .with_copy_options(copy_options(&config.install))
                    .with_dry_run(ctx.is_dry_run())
                    .with_cancel_token(ctx.cancel_token().clone())
                    .build();
                let installed = installer
                    .install(std::mem::take(&mut rules))
                    .await
                    .with_context(|| format!("failed to install {name}"))?;
                report = Some(installed);
            }
        }
    }

    let report = report.context("install phase did not run")?;
    Ok(Manifest::new(recipe, dependencies, report))
}

/// Refuses to delete a staging root that is a filesystem root or holds the
/// source checkout.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for `paths.staging` when deleting
/// it would take the checkout with it.
pub fn check_staging_safe_to_delete(staging: &Path, source: &Path) -> Result<()> {
    let staging = std::fs::canonicalize(staging).map_err(|e| FsError::from_io(staging, e))?;
    let source = std::fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());

    let reason = if staging.parent().is_none() {
        Some("is a filesystem root")
    } else if source.starts_with(&staging) {
        Some("contains the source checkout")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidValue {
            section: "paths".to_string(),
            key: "staging".to_string(),
            message: format!("refusing to clean '{}': {reason}", staging.display()),
        }
        .into()),
        None => Ok(()),
    }
}

/// Removes the staging root so the next install starts from an empty tree.
///
/// # Errors
///
/// Returns an error if the staging root fails
/// [`check_staging_safe_to_delete`], or [`FsError`] if it exists but cannot
/// be removed.
pub async fn clean_staging(staging: &Path, source: &Path, dry_run: bool) -> Result<()> {
    if !tokio::fs::try_exists(staging).await.unwrap_or(false) {
        return Ok(());
    }

    check_staging_safe_to_delete(staging, source)?;

    if dry_run {
        info!(path = %staging.display(), "[DRY-RUN] would delete staging root");
        return Ok(());
    }

    info!(path = %staging.display(), "Deleting staging root");
    tokio::fs::remove_dir_all(staging)
        .await
        .map_err(|e| FsError::from_io(staging, e))?;
    Ok(())
}
