// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::config::paths::PathsConfig;
use crate::error::{ConfigError, InstallError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ADMIN: &str = include_str!("../../demos/pulp-win-plugins-admin/recipe.toml");

fn checkout(temp: &TempDir) -> PathBuf {
    let source = temp.path().join("source");
    fs::create_dir_all(source.join("pulp_win/common")).unwrap();
    fs::write(source.join("pulp_win/common/ids.py"), "TYPE_ID_MSI = 'msi'\n").unwrap();
    fs::create_dir_all(source.join("admin")).unwrap();
    fs::write(source.join("admin/status.py"), "").unwrap();
    source
}

fn context(temp: &TempDir, source: PathBuf) -> CookContext {
    let config = Config {
        paths: PathsConfig {
            source: Some(source),
            staging: Some(temp.path().join("tmp-dest")),
            ..PathsConfig::default()
        },
        ..Config::default()
    };
    CookContext::new(Arc::new(config), CancellationToken::new())
}

#[test]
fn test_phase_order() {
    let names: Vec<_> = Phase::all().iter().map(Phase::name).collect();
    assert_eq!(names, vec!["build", "install"]);
}

#[test]
fn test_context_defaults_from_config() {
    let config = Config::parse("[global]\ndry = true\n[install]\nclean = true\n").unwrap();
    let ctx = CookContext::new(Arc::new(config), CancellationToken::new());
    assert!(ctx.is_dry_run());
    assert!(ctx.do_clean());

    let ctx = ctx.with_dry_run(false).with_clean(false);
    assert!(!ctx.is_dry_run());
    assert!(!ctx.do_clean());
}

#[test]
fn test_copy_options_from_config() {
    let install = InstallConfig {
        preserve_mode: false,
        follow_links: true,
        skip_dirs: vec![".git".to_string()],
        ..InstallConfig::default()
    };
    let options = copy_options(&install);
    assert_eq!(options.flags(), CopyFlags::FOLLOW_LINKS);
    assert_eq!(options.skip_dirs(), [".git".to_string()]);
}

#[tokio::test]
async fn test_cook_admin_recipe() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp, checkout(&temp));
    let recipe = Recipe::parse(ADMIN).unwrap();

    let manifest = cook(&recipe, &ctx, &RecipeOptions::default()).await.unwrap();

    let staging = temp.path().join("tmp-dest");
    assert!(
        staging
            .join("usr/lib/python2.6/site-packages/pulp_win/common/ids.py")
            .is_file()
    );
    assert!(staging.join("usr/lib/pulp/admin/status.py").is_file());
    assert_eq!(manifest.dependencies, vec!["python-sh", "msitools"]);
    assert_eq!(manifest.report.outcomes.len(), 2);
    assert_eq!(
        manifest.file_name(),
        PathBuf::from("pulp-win-plugins-admin-0.1-1.noarch.json")
    );
}

#[tokio::test]
async fn test_cook_clean_removes_stale_files() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp, checkout(&temp)).with_clean(true);
    let stale = temp.path().join("tmp-dest/usr/lib/pulp/admin/stale.py");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "").unwrap();

    let recipe = Recipe::parse(ADMIN).unwrap();
    cook(&recipe, &ctx, &RecipeOptions::default()).await.unwrap();

    assert!(!stale.exists());
    assert!(temp.path().join("tmp-dest/usr/lib/pulp/admin/status.py").is_file());
}

#[tokio::test]
async fn test_cook_dry_run_keeps_staging_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp, checkout(&temp))
        .with_dry_run(true)
        .with_clean(true);

    let recipe = Recipe::parse(ADMIN).unwrap();
    let manifest = cook(&recipe, &ctx, &RecipeOptions::default()).await.unwrap();

    assert!(manifest.report.dry_run);
    assert!(!temp.path().join("tmp-dest").exists());
}

#[tokio::test]
async fn test_cook_missing_source_surfaces_install_error() {
    let temp = tempfile::tempdir().unwrap();
    let source = checkout(&temp);
    fs::remove_dir_all(source.join("admin")).unwrap();
    let ctx = context(&temp, source);

    let recipe = Recipe::parse(ADMIN).unwrap();
    let err = cook(&recipe, &ctx, &RecipeOptions::default())
        .await
        .unwrap_err();

    let install = err.downcast_ref::<InstallError>().unwrap();
    assert!(install.is_source_not_found());
    assert!(
        temp.path()
            .join("tmp-dest/usr/lib/python2.6/site-packages/pulp_win")
            .is_dir(),
        "first rule stays applied"
    );
}

#[tokio::test]
async fn test_cook_cancelled_before_install() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp, checkout(&temp));
    ctx.cancel_token().cancel();

    let recipe = Recipe::parse(ADMIN).unwrap();
    let err = cook(&recipe, &ctx, &RecipeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<InstallError>(),
        Some(InstallError::Interrupted { index: 0 })
    ));
    assert!(ctx.is_cancelled());
}

#[tokio::test]
async fn test_cook_requires_paths() {
    let ctx = CookContext::new(Arc::new(Config::default()), CancellationToken::new());
    let recipe = Recipe::parse(ADMIN).unwrap();

    let err = cook(&recipe, &ctx, &RecipeOptions::default())
        .await
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'source' in section '[paths]'"
    );
}

#[tokio::test]
async fn test_manifest_write_json() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp, checkout(&temp));
    let recipe = Recipe::parse(ADMIN).unwrap();
    let manifest = cook(&recipe, &ctx, &RecipeOptions::default()).await.unwrap();

    let path = temp.path().join("pkg").join(manifest.file_name());
    manifest.write(&path).await.unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["package"]["name"], "pulp-win-plugins-admin");
    assert_eq!(value["dependencies"][1], "msitools");
    assert_eq!(value["report"]["outcomes"][1]["rule"]["kind"], "copy-tree");
    assert_eq!(
        value["report"]["outcomes"][1]["rule"]["destination_path"],
        "/usr/lib/pulp/admin"
    );
    assert_eq!(value["report"]["totals"]["files"], 2);
}

#[tokio::test]
async fn test_clean_staging_missing_is_ok() {
    let temp = tempfile::tempdir().unwrap();
    clean_staging(&temp.path().join("absent"), temp.path(), false)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_clean_refuses_staging_holding_the_checkout() {
    let temp = tempfile::tempdir().unwrap();
    let source = checkout(&temp);
    let config = Config {
        paths: PathsConfig {
            source: Some(source.clone()),
            staging: Some(temp.path().to_path_buf()),
            ..PathsConfig::default()
        },
        ..Config::default()
    };
    let ctx = CookContext::new(Arc::new(config), CancellationToken::new()).with_clean(true);

    let recipe = Recipe::parse(ADMIN).unwrap();
    let err = cook(&recipe, &ctx, &RecipeOptions::default())
        .await
        .unwrap_err();

    assert!(
        err.to_string().contains("contains the source checkout"),
        "{err}"
    );
    assert!(source.join("pulp_win/common/ids.py").is_file());
}

#[tokio::test]
async fn test_clean_refuses_source_and_filesystem_root() {
    let temp = tempfile::tempdir().unwrap();
    let source = checkout(&temp);

    let err = clean_staging(&source, &source, false).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key, .. }) if key == "staging"
    ));
    assert!(source.join("admin/status.py").is_file());

    let root = source.ancestors().last().unwrap().to_path_buf();
    let err = clean_staging(&root, &source, true).await.unwrap_err();
    assert!(err.to_string().contains("is a filesystem root"), "{err}");

    check_staging_safe_to_delete(&temp.path().join("source/admin"), &source.join("pulp_win"))
        .unwrap();
}
