// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  walk_tree(), WalkOptions
//!   copy:  copy_tree(), copy_file_into(), ensure_dir(), CopyFlags
//! ```

pub mod fs;
