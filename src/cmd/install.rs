// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install command implementation for cook-rs.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::recipe::InstallArgs;
use crate::config::Config;
use crate::cook::{CookContext, Manifest, cook};
use crate::error::Result;
use crate::recipe::Recipe;

/// Main handler for the install command.
///
/// `--source` and `--staging` are expected to be merged into `config`
/// already.
///
/// # Errors
///
/// Returns an error if the recipe cannot be loaded, the paths are not
/// configured, the install fails or is interrupted, or the manifest cannot
/// be written.
pub async fn run_install_command(args: &InstallArgs, config: &Config) -> Result<()> {
    let config = Arc::new(config.clone());
    let recipe = Recipe::from_file(&args.recipe)?;
    let options = args.groups.to_options(&config.recipe.with);

    let cancel_token = CancellationToken::new();
    let ctx = CookContext::new(Arc::clone(&config), cancel_token.clone())
        .with_clean(args.clean || config.install.clean);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, stopping before the next rule...");
            cancel_token.cancel();
        }
    });

    let manifest = cook(&recipe, &ctx, &options).await?;

    if let Some(path) = manifest_path(args, &config, &manifest) {
        if ctx.is_dry_run() {
            tracing::info!(path = %path.display(), "[DRY-RUN] would write manifest");
        } else {
            manifest.write(&path).await?;
        }
    }

    tracing::info!(
        recipe = %recipe.package.full_name(),
        files = manifest.report.totals.files,
        "Install completed successfully"
    );
    Ok(())
}

fn manifest_path(args: &InstallArgs, config: &Config, manifest: &Manifest) -> Option<PathBuf> {
    args.manifest.clone().or_else(|| {
        config
            .paths
            .manifests
            .as_ref()
            .map(|dir| dir.join(manifest.file_name()))
    })
}
