// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::parse_override;
use super::{Config, ConfigLoader, PathsConfig};
use crate::logging::{LogFormat, LogLevel};
use std::path::{Path, PathBuf};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.layout.lib, "/usr/lib");
    assert_eq!(config.layout.etc, "/etc");
    assert_eq!(config.layout.var, "/var");
    assert!(config.install.preserve_mode);
    assert!(!config.install.clean);
    assert!(config.recipe.with.is_empty());
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
dry = true
output_log_level = 4
log_format = "json"

[layout]
lib = "/usr/lib64"

[recipe]
with = ["python"]

[install]
clean = true
skip_dirs = ["__pycache__"]
"#;
    let config = Config::parse(toml).unwrap();
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_format, LogFormat::Json);
    assert_eq!(config.layout.lib, "/usr/lib64");
    assert_eq!(config.layout.etc, "/etc", "unset layout keys keep defaults");
    assert_eq!(config.recipe.with, vec!["python".to_string()]);
    assert!(config.install.clean);
    assert_eq!(config.install.skip_dirs, vec!["__pycache__".to_string()]);
}

#[test]
fn test_config_rejects_unknown_keys() {
    let toml = r"
[install]
clobber = true
";
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_config_rejects_invalid_log_level() {
    let toml = r"
[global]
output_log_level = 9
";
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_paths_resolve() {
    let mut paths = PathsConfig {
        prefix: Some(PathBuf::from("/work")),
        staging: Some(PathBuf::from("stage")),
        manifests: Some(PathBuf::from("/out/pkg")),
        ..Default::default()
    };

    paths.resolve();

    assert_eq!(paths.source.as_deref(), Some(Path::new("/work/source")));
    assert_eq!(paths.staging.as_deref(), Some(Path::new("/work/stage")));
    assert_eq!(paths.manifests.as_deref(), Some(Path::new("/out/pkg")));
}

#[test]
fn test_paths_without_prefix_stay_unset() {
    let mut paths = PathsConfig::default();
    paths.resolve();
    assert!(paths.source.is_none());
    assert!(paths.staging().is_err());
    let err = paths.source().unwrap_err().to_string();
    assert!(err.contains("'source'"), "unexpected error: {err}");
}

#[test]
fn test_overrides_applied_last() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\ndry = false\n")
        .with_overrides(["global/dry=true", "layout/var=/srv"])
        .unwrap()
        .build()
        .unwrap();
    assert!(config.global.dry);
    assert_eq!(config.layout.var, "/srv");
}

#[test]
fn test_parse_override() {
    assert_eq!(
        parse_override("install/clean = true").unwrap(),
        ("install.clean".to_string(), "true".to_string())
    );
    assert_eq!(
        parse_override("paths/staging=/tmp/a=b").unwrap(),
        ("paths.staging".to_string(), "/tmp/a=b".to_string())
    );
    assert!(parse_override("clean=true").is_err());
    assert!(parse_override("install/clean").is_err());
    assert!(parse_override("/clean=true").is_err());
}

#[test]
fn test_format_options_sorted_and_aligned() {
    let config = Config::default();
    let options = config.format_options();

    let keys: Vec<_> = options
        .iter()
        .map(|line| line.split_whitespace().next().unwrap().to_string())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    let eq_columns: Vec<_> = options.iter().map(|line| line.find(" = ")).collect();
    assert!(eq_columns.windows(2).all(|w| w[0] == w[1]));
    assert!(options.iter().any(|line| line.starts_with("layout.lib")));
}

#[test]
fn test_loaded_files_listing() {
    let loader = ConfigLoader::new()
        .add_toml_str("")
        .add_toml_file_optional("definitely-missing-cook.toml");
    assert_eq!(loader.format_loaded_files(), vec!["1. [string] <string>"]);
}
