//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod index;
pub mod init;
pub mod manifest;
pub mod release;
pub mod stage;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cli::output;
use crate::core::project::ReleaseConfig;
use crate::core::release::ReleasePlan;
use crate::infra::build_tool::BuildOutput;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a starter plugstage.toml
    Init {
        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing plugstage.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration and show the release plan
    Check {
        /// Release channel
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Run the build tool only
    Build,

    /// Read the build version and patch the manifest
    Manifest {
        /// Release channel
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Zip the build output and stage the archive
    Stage {
        /// Release channel
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Update the plugin index entry
    Index {
        /// Release channel
        #[arg(short, long)]
        channel: Option<String>,

        /// Version to write (read from the build manifest if omitted)
        #[arg(long, value_name = "VERSION")]
        set_version: Option<String>,
    },

    /// Build, patch, stage and update the index in one go
    Release {
        /// Release channel
        #[arg(short, long)]
        channel: Option<String>,

        /// Reuse the existing build output instead of building
        #[arg(long)]
        skip_build: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, project_dir: &Path) -> Result<()> {
        match self {
            Self::Init { name, force } => init::execute(project_dir, name, force).await,
            Self::Check { channel } => check::execute(project_dir, channel.as_deref()).await,
            Self::Build => build::execute(project_dir).await,
            Self::Manifest { channel } => manifest::execute(project_dir, channel.as_deref()).await,
            Self::Stage { channel } => stage::execute(project_dir, channel.as_deref()).await,
            Self::Index {
                channel,
                set_version,
            } => index::execute(project_dir, channel.as_deref(), set_version.as_deref()).await,
            Self::Release {
                channel,
                skip_build,
            } => release::execute(project_dir, channel.as_deref(), skip_build).await,
        }
    }
}

/// Load `plugstage.toml` from the project directory
pub(crate) fn load_config(project_dir: &Path) -> Result<ReleaseConfig> {
    ReleaseConfig::load(project_dir)
        .with_context(|| format!("Failed to load config from {}", project_dir.display()))
}

/// Load the config and resolve the plan for a channel
pub(crate) fn load_plan(project_dir: &Path, channel: Option<&str>) -> Result<ReleasePlan> {
    let config = load_config(project_dir)?;
    let plan = ReleasePlan::resolve(&config, project_dir, channel)
        .context("Failed to select release channel")?;
    tracing::debug!("Resolved release plan: {plan:?}");
    Ok(plan)
}

/// Build output handling for the current verbosity
pub(crate) fn build_output_mode() -> BuildOutput {
    if output::current().verbose > 0 && !output::current().json {
        BuildOutput::Inherit
    } else {
        BuildOutput::Capture
    }
}
