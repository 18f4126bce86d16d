//! CLI implementation for `plugstage build`
//!
//! Runs the configured build tool and fails if it exits non-zero.

use std::path::Path;

use anyhow::{Context, Result};

use super::{build_output_mode, load_config};
use crate::cli::output;
use crate::infra::build_tool::{self, BuildOutput};

/// Execute the build command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let config = load_config(project_dir)?;
    let invocation = config.build_invocation(project_dir);
    let mode = build_output_mode();

    output::info(&format!("Running {}", invocation.command_line()));
    let spinner = match mode {
        BuildOutput::Capture => Some(output::create_spinner("Building...")),
        BuildOutput::Inherit => None,
    };

    let result = build_tool::run_build(&invocation, mode).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result.context("Build failed")?;

    if output::current().json {
        return output::print_json(&report);
    }
    output::success(&format!(
        "Build succeeded in {:.1}s",
        report.duration_ms as f64 / 1000.0
    ));
    Ok(())
}
