// NOTE: chromastats command layout
//
// Every command reads stats files from disk and never talks to a bundler.
// Normalization itself is total (bad input passes through), so the CLI is
// where IO and parse failures surface, each mapped to `Error: ...` and exit 1.
// `check` is the only command that fails on well-formed input.

mod args;
mod commands;
pub mod config;
pub mod context;
mod handlers;
pub mod logging;
pub mod types;
mod views;

pub use args::{Cli, Commands};
pub use commands::run;
