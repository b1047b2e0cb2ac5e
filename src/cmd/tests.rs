// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use crate::cli::recipe::{CheckArgs, GroupArgs, InstallArgs};
use crate::cmd::check::run_check_command;
use crate::cmd::install::run_install_command;
use crate::cmd::show::ResolvedRecipe;
use crate::config::Config;
use crate::recipe::{Recipe, RecipeOptions};

const SERVER: &str = include_str!("../../demos/pulp-win-plugins-server/recipe.toml");

fn demo_recipe(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
        .join("recipe.toml")
}

fn server_checkout(root: &Path) {
    for dir in ["importers", "distributors", "types"] {
        fs::create_dir_all(root.join(dir)).unwrap();
        fs::write(root.join(dir).join("__init__.py"), "").unwrap();
    }
    fs::write(root.join("pulp_win.conf"), "Alias /pulp/win\n").unwrap();
}

#[test]
fn test_show_text_output() {
    let recipe = Recipe::parse(SERVER).unwrap();
    let resolved =
        ResolvedRecipe::new(&recipe, &Config::default(), &RecipeOptions::default()).unwrap();

    insta::assert_snapshot!(resolved.format_lines().join("\n"), @r"
    pulp-win-plugins-server (pulp-win-plugins-server-0.1-3.noarch)
      description: Pulp Windows plugins
      homepage:    https://github.com/lsjostro/pulp_win/
      section:     Development/Languages
      source:      https://github.com/lsjostro/pulp_win.git (with git)
    dependencies:
      (none)
    rules:
      1. copy-tree importers -> /usr/lib/pulp/plugins/importers
      2. copy-tree distributors -> /usr/lib/pulp/plugins/distributors
      3. copy-tree types -> /usr/lib/pulp/plugins/types
      4. copy-file pulp_win.conf -> /etc/httpd/conf.d
      5. mkdir /var/www/pulp_win/http/repos
    ");
}

#[test]
fn test_show_json_lists_rules() {
    let recipe = Recipe::parse(SERVER).unwrap();
    let options = GroupArgs {
        with: vec!["python".to_string()],
        without: Vec::new(),
    }
    .to_options(&[]);
    let resolved = ResolvedRecipe::new(&recipe, &Config::default(), &options).unwrap();

    let value = serde_json::to_value(&resolved).unwrap();
    assert_eq!(value["dependencies"][0], "python-sh");
    assert_eq!(value["rules"][4]["kind"], "mkdir");
    assert!(value["rules"][4].get("source_path").is_none());
}

#[tokio::test]
async fn test_check_command() {
    let temp = tempfile::tempdir().unwrap();
    server_checkout(temp.path());
    let mut config = Config::default();
    config.paths.source = Some(temp.path().to_path_buf());

    let args = CheckArgs {
        recipe: demo_recipe("pulp-win-plugins-server"),
        source: None,
    };
    run_check_command(&args, &config).await.unwrap();

    fs::remove_dir_all(temp.path().join("types")).unwrap();
    let err = run_check_command(&args, &config).await.unwrap_err();
    assert!(err.to_string().contains("source not found"), "{err}");
}

#[tokio::test]
async fn test_install_command_writes_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("source");
    server_checkout(&source);

    let config = Config::parse(&format!(
        "[paths]\nprefix = '{}'\n",
        temp.path().display().to_string().replace('\\', "/")
    ))
    .unwrap();
    let args = InstallArgs {
        recipe: demo_recipe("pulp-win-plugins-server"),
        ..InstallArgs::default()
    };

    run_install_command(&args, &config).await.unwrap();

    let staging = temp.path().join("tmp-dest");
    assert!(staging.join("usr/lib/pulp/plugins/types/__init__.py").is_file());
    assert!(staging.join("etc/httpd/conf.d/pulp_win.conf").is_file());
    assert!(staging.join("var/www/pulp_win/http/repos").is_dir());
    assert!(
        temp.path()
            .join("pkg/pulp-win-plugins-server-0.1-3.noarch.json")
            .is_file()
    );
}
