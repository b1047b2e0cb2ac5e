// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities for staging trees.
//!
//! ```text
//! walk:  walk_tree()       ignore::Walk, sorted, sequential
//!        WalkOptions       max_depth, hidden, ignore files, skip_dirs
//! copy:  copy_tree()       recursive copy, modes and symlinks kept
//!        copy_file_into()  single file into a directory
//!        ensure_dir()      mkdir -p with a typed error, never through a symlink
//! ```
//!
//! Copy errors are [`InstallError`](crate::error::InstallError)s: failures
//! reading the source are `SourceNotFound`, failures writing the
//! destination are `DestinationUnwritable`.

pub mod copy;
pub mod walk;
