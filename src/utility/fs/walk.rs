// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for directory traversal.
///
/// The defaults see a tree the way `cp -r` does: hidden entries are
/// included and `.gitignore`/`.ignore` files are not honored.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = true)]
    include_hidden: bool,
    /// Respect .gitignore and .ignore files
    #[builder(setters(name = with_respect_ignore_files), default = false)]
    respect_ignore_files: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_ignore_files(&self) -> bool {
        self.respect_ignore_files
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }
}

/// Kind of a walked entry, as seen without following links unless
/// [`WalkOptions::follow_links`] is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Symlink,
}

/// One entry below the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    relative: PathBuf,
    kind: EntryKind,
}

impl TreeEntry {
    /// Path relative to the walk root.
    #[must_use]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    let ignore_files = options.respect_ignore_files();
    builder.ignore(ignore_files);
    builder.parents(ignore_files);
    builder.git_ignore(ignore_files);
    builder.git_global(ignore_files);
    builder.git_exclude(ignore_files);

    // Parents before children, siblings by name: copies are reproducible.
    builder.sort_by_file_name(|a, b| a.cmp(b));

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.depth() > 0
                && entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Walks `root` sequentially and returns every entry below it.
///
/// The root itself is not included. Entries come back in depth-first order
/// with siblings sorted by file name, so every directory precedes its
/// contents.
///
/// # Errors
///
/// Returns the first traversal error (unreadable directory, broken link
/// while following links, ...). Nothing is returned partially.
///
/// # Example
/// ```no_run
/// use cook_rs::utility::fs::walk::{walk_tree, WalkOptions};
///
/// let entries = walk_tree("/path/to/checkout/admin", &WalkOptions::default())?;
/// println!("{} entries", entries.len());
/// # Ok::<(), ignore::Error>(())
/// ```
pub fn walk_tree<P: AsRef<Path>>(
    root: P,
    options: &WalkOptions,
) -> Result<Vec<TreeEntry>, ignore::Error> {
    let root = root.as_ref();
    let mut entries = Vec::new();

    for result in build_walker(root, options).build() {
        let entry = result?;
        if entry.depth() == 0 {
            continue;
        }

        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };

        let relative = entry
            .path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path().to_path_buf());

        entries.push(TreeEntry { relative, kind });
    }

    Ok(entries)
}
