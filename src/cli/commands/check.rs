//! Check command implementation
//!
//! Implements `plugstage check` to validate configuration without building.

use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use super::load_plan;
use crate::cli::output::{self, status};
use crate::core::check::{self, CheckResult};
use crate::core::release::ReleasePlan;

#[derive(Serialize)]
struct CheckReport<'a> {
    plan: &'a ReleasePlan,
    result: &'a CheckResult,
}

/// Execute the check command
pub async fn execute(project_dir: &Path, channel: Option<&str>) -> Result<()> {
    let plan = load_plan(project_dir, channel)?;
    tracing::info!("Checking channel: {}", plan.channel);

    let result = check::check(&plan);

    if output::current().json {
        output::print_json(&CheckReport {
            plan: &plan,
            result: &result,
        })?;
    } else if !output::current().quiet {
        print_plan(&plan);
        print_result(&result);
    }

    if !result.is_valid() {
        bail!("Check found {} problem(s)", result.errors.len());
    }
    Ok(())
}

fn print_plan(plan: &ReleasePlan) {
    println!("Release plan for channel '{}':\n", plan.channel);
    println!("  Build:     {}", plan.build.command_line());
    println!("  Manifest:  {}", plan.manifest_path.display());
    println!(
        "  Package:   {} ({})",
        plan.output_dir.display(),
        plan.compression
    );
    println!("  Archive:   {}", plan.archive_path.display());
    println!("  Index:     {} [entry {}]", plan.index_path.display(), plan.entry);
    if let Some(name) = &plan.internal_name {
        println!("  Rename:    InternalName -> {name}");
    }
    println!();
}

fn print_result(result: &CheckResult) {
    if result.build_tool_available {
        println!("{} Build tool is available", status::SUCCESS);
    }
    if let Some(version) = &result.manifest_version {
        println!("{} Current build version: {version}", status::SUCCESS);
    }
    if result.index_entry_valid {
        println!("{} Plugin index entry found", status::SUCCESS);
    }
    for warning in &result.warnings {
        println!("{} {warning}", status::WARNING);
    }
    for error in &result.errors {
        println!("{} {error}", status::ERROR);
    }
}
