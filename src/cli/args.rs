//! Command-line interface definitions.

use crate::config::CONFIG_FILE;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// themec - SCSS build/watch tool for BetterDiscord and Vencord themes
#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: themec.toml)
    #[arg(short = 'C', long, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile the dist, base and addon targets once
    #[command(visible_alias = "b")]
    Build,

    /// Watch the source folder and recompile the dev target on every change
    #[command(visible_alias = "d")]
    Dev {
        /// Override the auto-detected BetterDiscord themes folder
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        bd_folder: Option<PathBuf>,
    },
}
