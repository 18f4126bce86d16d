//! CLI implementation for `plugstage release`
//!
//! Runs build, manifest patch, packaging and index update in order and
//! prints a summary.

use std::path::Path;

use anyhow::{Context, Result};

use super::{build_output_mode, load_plan};
use crate::cli::output;
use crate::core::release::{run_release, ReleaseOptions};
use crate::infra::build_tool::BuildOutput;

/// Execute the release command
pub async fn execute(project_dir: &Path, channel: Option<&str>, skip_build: bool) -> Result<()> {
    let plan = load_plan(project_dir, channel)?;
    let options = ReleaseOptions {
        skip_build,
        build_output: build_output_mode(),
        now: None,
    };

    output::info(&format!("Releasing to channel '{}'", plan.channel));
    if !skip_build {
        output::detail(&plan.build.command_line());
    }

    let spinner = (!skip_build && options.build_output == BuildOutput::Capture)
        .then(|| output::create_spinner("Building..."));
    let result = run_release(&plan, options).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result.with_context(|| format!("Release to '{}' failed", plan.channel))?;

    if output::current().json {
        return output::print_json(&report);
    }

    if let Some(build) = &report.build {
        output::success(&format!(
            "Build succeeded in {:.1}s",
            build.duration_ms as f64 / 1000.0
        ));
    }
    output::success(&format!("Build version: {}", report.manifest.version));
    output::success(&format!(
        "Staged {} ({} files, {})",
        report.archive.path.display(),
        report.archive.files.len(),
        output::format_size(report.archive.size)
    ));
    output::detail(&format!("sha256 {}", report.archive.sha256));
    output::success(&format!(
        "Updated entry {} of {} (LastUpdated {})",
        report.index.entry,
        report.index.path.display(),
        report.index.last_updated
    ));
    Ok(())
}
