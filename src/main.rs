// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Install | Show | Check
//! ```

use std::process::ExitCode;

use cook_rs::cli::global::GlobalOptions;
use cook_rs::cli::{self, Command};
use cook_rs::cmd::check::run_check_command;
use cook_rs::cmd::config::{run_inis_command, run_options_command};
use cook_rs::cmd::install::run_install_command;
use cook_rs::cmd::show::run_show_command;
use cook_rs::config::Config;
use cook_rs::config::loader::ConfigLoader;
use cook_rs::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_INI: &str = "cook.toml";
const ENV_PREFIX: &str = "COOK";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // A broken config still gets console logging at the requested level.
    let config = load_config(&cli);

    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| config.map(|c| c.global.output_log_level))
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| config.map(|c| c.global.file_log_level))
        .unwrap_or(console_level);

    let log_file = global
        .log_file
        .clone()
        .or_else(|| config.and_then(|c| c.global.log_file.clone()));

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file.map(|p| p.display().to_string()))
        .maybe_with_file_format(config.map(|c| c.global.log_format))
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: cook_rs::error::Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Install(args)) => match config {
            Ok(config) => run_install_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Show(args)) => config.and_then(|config| run_show_command(args, &config)),
        Some(Command::Check(args)) => match config {
            Ok(config) => run_check_command(args, &config).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_INI);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(cli: &cli::Cli) -> cook_rs::error::Result<Config> {
    build_config_loader(&cli.global)
        .with_overrides(cli.config_overrides())
        .and_then(ConfigLoader::build)
}
