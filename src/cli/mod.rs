//! CLI module
//!
//! Command-line interface for exporting reports.
//!
//! With no flags, every built-in report is exported using configuration
//! from the environment (and `.env`). Flags override individual settings.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
