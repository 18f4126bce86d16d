//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no release logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::Commands;

/// Plugstage - build, package and stage plugin releases
///
/// Runs the plugin build, zips the build output, stages the archive and
/// refreshes the plugin master index.
#[derive(Parser, Debug)]
#[command(name = "plugstage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory containing plugstage.toml
    #[arg(short = 'C', long, global = true, env = "PLUGSTAGE_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        if let Some(cmd) = self.command {
            cmd.run(&project_dir).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
