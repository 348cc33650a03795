//! themec - SCSS build/watch tool for BetterDiscord and Vencord themes.

#![allow(dead_code)]

mod cli;
mod compile;
mod config;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ThemeConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    // Missing or invalid config is fatal before any compilation starts
    let config = match ThemeConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            log!("error"; "{err}");
            if matches!(err, config::ConfigError::NotFound(_)) {
                log!("error"; "run from your project root, or pass {}", logger::code("--config <path>"));
            }
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Build => cli::build::run_build(&config),
        Commands::Dev { bd_folder } => cli::dev::run_dev(config, bd_folder),
    }
}
