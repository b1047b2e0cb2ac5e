// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use bitflags::bitflags;
use bon::Builder;
use tokio::fs;
use tracing::{debug, trace, warn};

use super::walk::{EntryKind, WalkOptions, walk_tree};
use crate::error::{InstallError, InstallResult};

bitflags! {
    /// Flags controlling how entries are copied.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CopyFlags: u8 {
        /// Copy permission bits of files and directories.
        const PRESERVE_MODE = 0x01;

        /// Copy link targets instead of recreating symlinks.
        const FOLLOW_LINKS = 0x02;
    }
}

impl Default for CopyFlags {
    fn default() -> Self {
        Self::PRESERVE_MODE
    }
}

/// Options for tree and file copies.
#[derive(Debug, Clone, Default, Builder)]
pub struct CopyOptions {
    #[builder(setters(name = with_flags), default)]
    flags: CopyFlags,
    /// Directory names never descended into.
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl CopyOptions {
    #[must_use]
    pub const fn flags(&self) -> CopyFlags {
        self.flags
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions::builder()
            .with_follow_links(self.flags.contains(CopyFlags::FOLLOW_LINKS))
            .with_skip_dirs(self.skip_dirs.clone())
            .build()
    }
}

/// Counters of what a copy wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
    pub symlinks: usize,
    pub bytes: u64,
}

impl std::ops::AddAssign for CopyStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.dirs += other.dirs;
        self.symlinks += other.symlinks;
        self.bytes += other.bytes;
    }
}

fn through_symlink(path: &Path) -> InstallError {
    InstallError::unwritable(
        path,
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path is a symlink in the staging tree",
        ),
    )
}

/// Fails if any existing component of `dst` below `root` is a symlink.
///
/// Components are checked from `root` downwards; the first missing one ends
/// the check since nothing below it exists yet. `root` itself is trusted.
///
/// # Errors
///
/// Returns `DestinationUnwritable` naming the first symlinked component.
pub async fn reject_symlinked_components(root: &Path, dst: &Path) -> InstallResult<()> {
    let Ok(relative) = dst.strip_prefix(root) else {
        return Ok(());
    };

    let mut current = root.to_path_buf();
    for component in relative.components() {
        current.push(component);
        match fs::symlink_metadata(&current).await {
            Ok(meta) if meta.file_type().is_symlink() => return Err(through_symlink(&current)),
            Ok(_) => {}
            Err(_) => break,
        }
    }
    Ok(())
}

/// Creates `dst` and all missing parents.
///
/// An existing symlink at `dst` is never followed.
///
/// # Errors
///
/// Returns `DestinationUnwritable` if a component cannot be created, `dst`
/// is a symlink, or an existing non-directory occupies the path.
pub async fn ensure_dir(dst: &Path) -> InstallResult<()> {
    match fs::symlink_metadata(dst).await {
        Ok(meta) if meta.file_type().is_symlink() => return Err(through_symlink(dst)),
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(InstallError::unwritable(
                dst,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "path exists and is not a directory",
                ),
            ));
        }
        Err(_) => {}
    }

    fs::create_dir_all(dst)
        .await
        .map_err(|e| InstallError::unwritable(dst, e))
}

/// Recursively copies everything below `src` into `dst`.
///
/// `dst` is created if needed. Existing files in `dst` are overwritten,
/// unrelated files are left alone. When `src` is a regular file it is
/// copied into `dst` under its own name.
///
/// # Errors
///
/// - `SourceNotFound` if `src` is missing or its tree cannot be read.
/// - `DestinationUnwritable` if any destination entry cannot be written.
///
/// # Example
/// ```no_run
/// use cook_rs::utility::fs::copy::{copy_tree, CopyOptions};
/// use std::path::Path;
///
/// # async fn example() -> cook_rs::error::InstallResult<()> {
/// let stats = copy_tree(
///     Path::new("/checkout/admin"),
///     Path::new("/stage/usr/lib/pulp/admin"),
///     &CopyOptions::default(),
/// )
/// .await?;
/// println!("{} files", stats.files);
/// # Ok(())
/// # }
/// ```
pub async fn copy_tree(src: &Path, dst: &Path, options: &CopyOptions) -> InstallResult<CopyStats> {
    let meta = fs::metadata(src)
        .await
        .map_err(|_| InstallError::source_not_found(src))?;

    if !meta.is_dir() {
        return copy_file_into(src, dst, options).await;
    }

    let root = src.to_path_buf();
    let walk_options = options.walk_options();
    let entries = tokio::task::spawn_blocking(move || walk_tree(&root, &walk_options))
        .await
        .map_err(|e| InstallError::unwritable(dst, std::io::Error::other(e)))?
        .map_err(|e| {
            warn!(src = %src.display(), error = %e, "failed to read source tree");
            InstallError::source_not_found(src)
        })?;

    ensure_dir(dst).await?;

    let mut stats = CopyStats::default();
    let mut copied_dirs: Vec<(PathBuf, PathBuf)> = vec![(src.to_path_buf(), dst.to_path_buf())];

    for entry in entries {
        let from = src.join(entry.relative());
        let to = dst.join(entry.relative());

        match entry.kind() {
            EntryKind::Dir => {
                ensure_dir(&to).await?;
                stats.dirs += 1;
                copied_dirs.push((from, to));
            }
            EntryKind::File => {
                stats.bytes += copy_regular_file(&from, &to, options.flags()).await?;
                stats.files += 1;
            }
            EntryKind::Symlink => {
                copy_symlink(&from, &to).await?;
                stats.symlinks += 1;
            }
        }
        trace!(entry = %entry.relative().display(), "staged");
    }

    // Modes go on last so read-only source directories do not block their
    // own children.
    if options.flags().contains(CopyFlags::PRESERVE_MODE) {
        for (from, to) in copied_dirs.iter().rev() {
            copy_permissions(from, to).await?;
        }
    }

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        files = stats.files,
        dirs = stats.dirs,
        symlinks = stats.symlinks,
        "copied tree"
    );

    Ok(stats)
}

/// Copies the regular file `src` into the directory `dst_dir`, keeping its
/// file name. `dst_dir` is created if needed.
///
/// # Errors
///
/// - `SourceNotFound` if `src` is missing, is a directory, or has no file name.
/// - `DestinationUnwritable` if the directory or the file cannot be written.
pub async fn copy_file_into(
    src: &Path,
    dst_dir: &Path,
    options: &CopyOptions,
) -> InstallResult<CopyStats> {
    let meta = fs::metadata(src)
        .await
        .map_err(|_| InstallError::source_not_found(src))?;
    let Some(name) = src.file_name().filter(|_| !meta.is_dir()) else {
        return Err(InstallError::source_not_found(src));
    };

    ensure_dir(dst_dir).await?;
    let to = dst_dir.join(name);
    let bytes = copy_regular_file(src, &to, options.flags()).await?;

    debug!(src = %src.display(), dst = %to.display(), bytes, "copied file");

    Ok(CopyStats {
        files: 1,
        bytes,
        ..CopyStats::default()
    })
}

async fn copy_regular_file(src: &Path, dst: &Path, flags: CopyFlags) -> InstallResult<u64> {
    fs::symlink_metadata(src)
        .await
        .map_err(|_| InstallError::source_not_found(src))?;

    replace_symlink(dst).await?;

    if flags.contains(CopyFlags::PRESERVE_MODE) {
        return fs::copy(src, dst)
            .await
            .map_err(|e| InstallError::unwritable(dst, e));
    }

    let mut reader = fs::File::open(src)
        .await
        .map_err(|_| InstallError::source_not_found(src))?;
    let mut writer = fs::File::create(dst)
        .await
        .map_err(|e| InstallError::unwritable(dst, e))?;
    tokio::io::copy(&mut reader, &mut writer)
        .await
        .map_err(|e| InstallError::unwritable(dst, e))
}

/// Removes `dst` if it is a symlink so writes never go through a stale link.
async fn replace_symlink(dst: &Path) -> InstallResult<()> {
    if let Ok(meta) = fs::symlink_metadata(dst).await
        && meta.file_type().is_symlink()
    {
        fs::remove_file(dst)
            .await
            .map_err(|e| InstallError::unwritable(dst, e))?;
    }
    Ok(())
}

#[cfg(unix)]
async fn copy_symlink(src: &Path, dst: &Path) -> InstallResult<()> {
    let target = fs::read_link(src)
        .await
        .map_err(|_| InstallError::source_not_found(src))?;

    replace_symlink(dst).await?;
    fs::symlink(&target, dst)
        .await
        .map_err(|e| InstallError::unwritable(dst, e))
}

#[cfg(not(unix))]
async fn copy_symlink(src: &Path, dst: &Path) -> InstallResult<()> {
    copy_regular_file(src, dst, CopyFlags::PRESERVE_MODE)
        .await
        .map(|_| ())
}

async fn copy_permissions(src: &Path, dst: &Path) -> InstallResult<()> {
    let permissions = fs::metadata(src)
        .await
        .map_err(|_| InstallError::source_not_found(src))?
        .permissions();
    fs::set_permissions(dst, permissions)
        .await
        .map_err(|e| InstallError::unwritable(dst, e))
}
