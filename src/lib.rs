// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          install / show / check
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            |
//!                            v
//!   recipe (TOML) -------> cook
//!   metadata, deps,     build, install,
//!   %(var)s directives    manifest
//!                            |
//!                            v
//!                         install
//!                 ordered InstallRules,
//!                 cancel token, dry run
//!
//!   +-----------------------------------------+
//!   |  utility::fs   walk, copy, ensure_dir   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod cook;
pub mod error;
pub mod install;
pub mod logging;
pub mod recipe;
pub mod utility;
