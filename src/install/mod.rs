// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The recipe installer.
//!
//! ```text
//! [InstallRule, ...]   (declaration order)
//!        |
//!        v
//!   Installer::install
//!        |  for each rule:
//!        |    cancelled?      --> Interrupted
//!        |    copy-tree       --> copy_tree(src, staging/dest)
//!        |    copy-file       --> copy_file_into(src, staging/dest)
//!        |    mkdir           --> ensure_dir(staging/dest)
//!        |    first error     --> abort, earlier rules stay applied
//!        v
//!   InstallReport
//! ```
//!
//! There is no rollback: a failed install leaves the staging root with
//! exactly the rules that were applied before the failure.

pub mod rule;


use std::path::{Path, PathBuf};

use bon::Builder;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span};

use crate::error::{InstallError, InstallResult};
use crate::utility::fs::copy::{
    CopyOptions, CopyStats, copy_file_into, copy_tree, ensure_dir, reject_symlinked_components,
};

pub use rule::{InstallRule, RuleKind};

/// Result of one applied rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: InstallRule,
    pub stats: CopyStats,
}

/// What an install wrote, rule by rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub outcomes: Vec<RuleOutcome>,
    pub totals: CopyStats,
    pub dry_run: bool,
}

impl InstallReport {
    fn push(&mut self, rule: InstallRule, stats: CopyStats) {
        self.totals += stats;
        self.outcomes.push(RuleOutcome { rule, stats });
    }
}

/// Applies install rules from a source checkout into a staging root.
#[derive(Debug, Clone, Builder)]
pub struct Installer {
    #[builder(into)]
    source_root: PathBuf,
    #[builder(into)]
    dest_root: PathBuf,
    #[builder(setters(name = with_copy_options), default)]
    copy_options: CopyOptions,
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
    #[builder(setters(name = with_cancel_token), default)]
    cancel_token: CancellationToken,
}

impl Installer {
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    #[must_use]
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Applies `rules` in order.
    ///
    /// The rule list is consumed; each rule runs exactly once.
    ///
    /// # Errors
    ///
    /// Stops at the first failing rule:
    /// - `SourceNotFound` if a copy rule's source is missing.
    /// - `DestinationUnwritable` if its destination cannot be created or written.
    /// - `Interrupted` if the cancellation token fired before a rule started.
    pub async fn install(&self, rules: Vec<InstallRule>) -> InstallResult<InstallReport> {
        let mut report = InstallReport {
            dry_run: self.dry_run,
            ..InstallReport::default()
        };

        for (index, rule) in rules.into_iter().enumerate() {
            if self.cancel_token.is_cancelled() {
                return Err(InstallError::Interrupted { index });
            }

            let span = info_span!("rule", index, kind = %rule.kind());
            let stats = self.apply(&rule).instrument(span).await?;
            report.push(rule, stats);
        }

        info!(
            rules = report.outcomes.len(),
            files = report.totals.files,
            dirs = report.totals.dirs,
            symlinks = report.totals.symlinks,
            dry_run = self.dry_run,
            "install finished"
        );

        Ok(report)
    }

    /// Verifies every copy rule's source exists, without writing anything.
    ///
    /// # Errors
    ///
    /// `SourceNotFound` for the first rule whose source is missing.
    pub async fn check(&self, rules: &[InstallRule]) -> InstallResult<()> {
        for rule in rules.iter().filter(|r| r.kind().needs_source()) {
            self.existing_source(rule).await?;
        }
        Ok(())
    }

    async fn existing_source(&self, rule: &InstallRule) -> InstallResult<PathBuf> {
        let src = rule.resolve_source(&self.source_root)?;
        match tokio::fs::try_exists(&src).await {
            Ok(true) => Ok(src),
            _ => Err(InstallError::source_not_found(src)),
        }
    }

    async fn apply(&self, rule: &InstallRule) -> InstallResult<CopyStats> {
        let dst = rule.resolve_destination(&self.dest_root)?;
        reject_symlinked_components(&self.dest_root, &dst).await?;
        let src = if rule.kind().needs_source() {
            Some(self.existing_source(rule).await?)
        } else {
            None
        };

        if self.dry_run {
            info!(rule = %rule, dst = %dst.display(), "[DRY-RUN] would apply");
            return Ok(CopyStats::default());
        }

        info!(rule = %rule, "applying");

        match (rule.kind(), src) {
            (RuleKind::CopyTree, Some(src)) => copy_tree(&src, &dst, &self.copy_options).await,
            (RuleKind::CopyFile, Some(src)) => {
                copy_file_into(&src, &dst, &self.copy_options).await
            }
            (RuleKind::CreateEmptyDir, _) => {
                ensure_dir(&dst).await?;
                Ok(CopyStats {
                    dirs: 1,
                    ..CopyStats::default()
                })
            }
            (_, None) => Err(InstallError::source_not_found(&self.source_root)),
        }
    }
}

/// Applies `rules` from `source_root` into `dest_root` with default options.
///
/// # Errors
///
/// See [`Installer::install`].
///
/// # Example
/// ```no_run
/// use cook_rs::install::{install, InstallRule};
/// use std::path::Path;
///
/// # async fn example() -> cook_rs::error::InstallResult<()> {
/// let rules = vec![
///     InstallRule::copy_tree("pulp_win", "/usr/lib/python2.6/site-packages/pulp_win"),
///     InstallRule::create_empty_dir("/var/www/pulp_win/http/repos"),
/// ];
/// install(rules, Path::new("checkout"), Path::new("tmp-dest")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn install(
    rules: Vec<InstallRule>,
    source_root: &Path,
    dest_root: &Path,
) -> InstallResult<InstallReport> {
    Installer::builder()
        .source_root(source_root)
        .dest_root(dest_root)
        .build()
        .install(rules)
        .await
}
