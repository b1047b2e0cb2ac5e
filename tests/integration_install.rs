// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the installer.
//!
//! Runs the shipped recipes against a checkout shaped like the upstream
//! `pulp_win` repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cook_rs::config::Config;
use cook_rs::config::types::LayoutConfig;
use cook_rs::cook::{CookContext, cook};
use cook_rs::error::InstallError;
use cook_rs::install::{InstallRule, Installer, install};
use cook_rs::recipe::{Recipe, RecipeOptions};
use cook_rs::utility::fs::walk::{EntryKind, WalkOptions, walk_tree};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn recipe(name: &str) -> Recipe {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
        .join("recipe.toml");
    Recipe::from_file(path).unwrap()
}

/// Writes a checkout with every source the demo recipes copy.
fn pulp_win_checkout(root: &Path) {
    let files = [
        ("pulp_win/__init__.py", ""),
        ("pulp_win/common/ids.py", "TYPE_ID_MSI = 'msi'\n"),
        ("pulp_win/common/constants.py", "STATE_COMPLETE = 'FINISHED'\n"),
        ("importers/win_importer/importer.py", "class WinImporter: pass\n"),
        ("distributors/win_distributor/distributor.py", "class WinDistributor: pass\n"),
        ("types/win.json", "{\"types\": []}\n"),
        ("admin/pulp_win/extensions/admin/status.py", "# status\n"),
        ("pulp_win.conf", "Alias /pulp/win /var/www/pulp_win/http/repos\n"),
    ];
    for (path, content) in files {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn listing(root: &Path) -> Vec<(PathBuf, EntryKind)> {
    walk_tree(root, &WalkOptions::default())
        .unwrap()
        .into_iter()
        .map(|e| (e.relative().to_path_buf(), e.kind()))
        .collect()
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("source");
    let staging = temp.path().join("tmp-dest");
    pulp_win_checkout(&source);
    (temp, source, staging)
}

// =============================================================================
// Shipped recipes
// =============================================================================

#[tokio::test]
async fn install_full_recipe() {
    let (_temp, source, staging) = setup();
    let rules = recipe("pulp-win-plugins").rules(&LayoutConfig::default()).unwrap();

    let report = install(rules, &source, &staging).await.unwrap();

    assert_eq!(report.outcomes.len(), 7);
    assert_eq!(report.totals.files, 8);
    for (staged, original) in [
        ("usr/lib/python2.6/site-packages/pulp_win/common/ids.py", "pulp_win/common/ids.py"),
        (
            "usr/lib/pulp/plugins/importers/win_importer/importer.py",
            "importers/win_importer/importer.py",
        ),
        (
            "usr/lib/pulp/plugins/distributors/win_distributor/distributor.py",
            "distributors/win_distributor/distributor.py",
        ),
        ("usr/lib/pulp/plugins/types/win.json", "types/win.json"),
        (
            "usr/lib/pulp/admin/pulp_win/extensions/admin/status.py",
            "admin/pulp_win/extensions/admin/status.py",
        ),
        ("etc/httpd/conf.d/pulp_win.conf", "pulp_win.conf"),
    ] {
        assert_eq!(
            fs::read(staging.join(staged)).unwrap(),
            fs::read(source.join(original)).unwrap(),
            "{staged}"
        );
    }
    let repos = staging.join("var/www/pulp_win/http/repos");
    assert!(repos.is_dir());
    assert_eq!(fs::read_dir(repos).unwrap().count(), 0);
}

#[tokio::test]
async fn install_server_recipe_skips_site_packages() {
    let (_temp, source, staging) = setup();
    let rules = recipe("pulp-win-plugins-server")
        .rules(&LayoutConfig::default())
        .unwrap();

    install(rules, &source, &staging).await.unwrap();

    assert!(staging.join("usr/lib/pulp/plugins/types/win.json").is_file());
    assert!(!staging.join("usr/lib/python2.6").exists());
    assert!(!staging.join("usr/lib/pulp/admin").exists());
}

#[tokio::test]
async fn install_admin_recipe_only_admin_parts() {
    let (_temp, source, staging) = setup();
    let rules = recipe("pulp-win-plugins-admin")
        .rules(&LayoutConfig::default())
        .unwrap();

    install(rules, &source, &staging).await.unwrap();

    let top: Vec<_> = fs::read_dir(staging.join("usr/lib"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(top.len(), 2);
    assert!(!staging.join("etc").exists());
    assert!(!staging.join("var").exists());
}

// =============================================================================
// Error semantics
// =============================================================================

#[tokio::test]
async fn missing_source_keeps_partial_state() {
    let (_temp, source, staging) = setup();
    fs::remove_dir_all(source.join("types")).unwrap();
    let rules = recipe("pulp-win-plugins").rules(&LayoutConfig::default()).unwrap();

    let err = install(rules, &source, &staging).await.unwrap_err();

    match err {
        InstallError::SourceNotFound { path } => assert_eq!(path, source.join("types")),
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
    assert!(staging.join("usr/lib/pulp/plugins/distributors").is_dir());
    assert!(!staging.join("usr/lib/pulp/admin").exists());
    assert!(!staging.join("var").exists());
}

#[tokio::test]
async fn destination_occupied_by_file() {
    let (_temp, source, staging) = setup();
    fs::create_dir_all(staging.join("etc/httpd")).unwrap();
    fs::write(staging.join("etc/httpd/conf.d"), "").unwrap();

    let rules = vec![InstallRule::copy_file("pulp_win.conf", "/etc/httpd/conf.d")];
    let err = install(rules, &source, &staging).await.unwrap_err();

    assert!(err.is_destination_unwritable());
    assert!(err.to_string().starts_with("destination unwritable: "));
}

#[cfg(unix)]
#[tokio::test]
async fn read_only_staging_is_unwritable() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, source, staging) = setup();
    fs::create_dir_all(&staging).unwrap();
    fs::set_permissions(&staging, fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores permission bits.
    if fs::write(staging.join("write-test"), "").is_ok() {
        return;
    }

    let rules = vec![InstallRule::create_empty_dir("/var/www")];
    let err = install(rules, &source, &staging).await.unwrap_err();
    fs::set_permissions(&staging, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(err.is_destination_unwritable());
}

// =============================================================================
// Determinism
// =============================================================================

#[tokio::test]
async fn repeated_installs_produce_identical_trees() {
    let (_temp, source, staging) = setup();
    let rules = || recipe("pulp-win-plugins").rules(&LayoutConfig::default()).unwrap();

    install(rules(), &source, &staging).await.unwrap();
    let first = listing(&staging);

    fs::remove_dir_all(&staging).unwrap();
    install(rules(), &source, &staging).await.unwrap();
    assert_eq!(first, listing(&staging));

    // Installing over an existing tree overwrites in place.
    install(rules(), &source, &staging).await.unwrap();
    assert_eq!(first, listing(&staging));
}

#[tokio::test]
async fn cook_with_clean_and_manifest_dir() {
    let temp = tempfile::tempdir().unwrap();
    pulp_win_checkout(&temp.path().join("source"));
    let config = Config::parse(&format!(
        "[paths]\nprefix = '{}'\n[install]\nclean = true\nskip_dirs = ['win_importer']\n",
        temp.path().display().to_string().replace('\\', "/")
    ))
    .unwrap();
    let ctx = CookContext::new(Arc::new(config), CancellationToken::new());

    let manifest = cook(&recipe("pulp-win-plugins"), &ctx, &RecipeOptions::default())
        .await
        .unwrap();

    let staging = temp.path().join("tmp-dest");
    assert!(staging.join("usr/lib/pulp/plugins/importers").is_dir());
    assert!(!staging.join("usr/lib/pulp/plugins/importers/win_importer").exists());
    assert_eq!(manifest.dependencies, vec!["python-sh", "msitools"]);
}

#[tokio::test]
async fn installer_check_then_dry_run() {
    let (_temp, source, staging) = setup();
    let rules = recipe("pulp-win-plugins").rules(&LayoutConfig::default()).unwrap();
    let installer = Installer::builder()
        .source_root(&source)
        .dest_root(&staging)
        .with_dry_run(true)
        .build();

    installer.check(&rules).await.unwrap();
    let report = installer.install(rules).await.unwrap();

    assert_eq!(report.outcomes.len(), 7);
    assert_eq!(report.totals.files, 0);
    assert!(!staging.exists());
}
