// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   install, show, check, config
//! ```

pub mod check;
pub mod config;
pub mod install;
pub mod show;

#[cfg(test)]
mod tests;
