// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use std::io;
use std::path::Path;

use super::{ConfigError, FsError, InstallError, RecipeError, Result};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "staging".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'staging' in section '[paths]'");
}

#[test]
fn test_install_error_display() {
    let err = InstallError::source_not_found("/src/pulp_win");
    insta::assert_snapshot!(err.to_string(), @"source not found: /src/pulp_win");

    let err = InstallError::Interrupted { index: 3 };
    insta::assert_snapshot!(err.to_string(), @"install interrupted before rule 3");
}

#[test]
fn test_install_error_kinds() {
    let missing = InstallError::source_not_found("/nope");
    assert!(missing.is_source_not_found());
    assert!(!missing.is_destination_unwritable());

    let unwritable = InstallError::unwritable(
        Path::new("/stage/etc"),
        io::Error::from(io::ErrorKind::PermissionDenied),
    );
    assert!(unwritable.is_destination_unwritable());
    assert!(!unwritable.is_source_not_found());
}

#[test]
fn test_recipe_error_survives_anyhow_context() {
    let err: Result<()> = Err(RecipeError::UnknownGroup {
        recipe: "pulp-win-plugins".to_string(),
        group: "ruby".to_string(),
    }
    .into());
    let err = err.context("failed to load recipe").unwrap_err();

    insta::assert_snapshot!(
        format!("{err:#}"),
        @"failed to load recipe: recipe 'pulp-win-plugins' has no dependency group 'ruby'"
    );
    assert!(matches!(
        err.downcast_ref::<RecipeError>(),
        Some(RecipeError::UnknownGroup { .. })
    ));
}

#[test]
fn test_fs_error_classification() {
    let path = Path::new("/stage");
    assert!(matches!(
        FsError::from_io(path, io::Error::from(io::ErrorKind::NotFound)),
        FsError::NotFound(_)
    ));
    assert!(matches!(
        FsError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied)),
        FsError::PermissionDenied(_)
    ));
    assert!(matches!(
        FsError::from_io(path, io::Error::other("boom")),
        FsError::IoError { .. }
    ));
}
