use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chromastats")]
#[command(about = "Normalize Rspack stats for visual-regression change tracing", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (default: ./chromastats.toml, then the user config dir)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory absolute module paths are made relative to")]
    pub base_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Append flattened top-level modules to a stats file")]
    Normalize {
        #[arg(help = "Stats file, or a directory searched for stats files")]
        path: PathBuf,

        #[arg(long, short, conflicts_with = "in_place", help = "Write the result here instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Rewrite the input file(s)")]
        in_place: bool,

        #[arg(long, help = "Emit compact JSON")]
        compact: bool,
    },

    #[command(about = "Verify a stats file satisfies the top-level module contract")]
    Check {
        #[arg(help = "Stats file, or a directory containing one")]
        path: PathBuf,
    },

    #[command(about = "Look up modules and their importers in a normalized stats file")]
    Trace {
        #[arg(help = "Stats file, or a directory containing one")]
        path: PathBuf,

        #[arg(help = "Module id or name")]
        query: String,

        #[arg(long, help = "Match ids, names and importers by substring")]
        partial: bool,

        #[arg(long, help = "List modules imported by the query instead of its importers")]
        dependents: bool,
    },
}
