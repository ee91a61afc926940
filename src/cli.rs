//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Role Graph - Resolve role dependency graphs for automation playbooks
#[derive(Parser, Debug)]
#[command(name = "rolegraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve roles and print their flattened dependency order
    Resolve(commands::resolve::ResolveArgs),

    /// Display a role's dependency graph as a tree
    Tree(commands::tree::TreeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // try_init: harmless if a logger is already installed (tests)
        let _ = env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .try_init();

        match self.command {
            Commands::Resolve(args) => commands::resolve::execute(args),
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
