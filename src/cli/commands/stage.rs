//! CLI implementation for `plugstage stage`
//!
//! Zips the top-level build output files and stages the archive.

use std::path::Path;

use anyhow::{Context, Result};

use super::load_plan;
use crate::cli::output;
use crate::core::release;

/// Execute the stage command
pub async fn execute(project_dir: &Path, channel: Option<&str>) -> Result<()> {
    let plan = load_plan(project_dir, channel)?;
    let staged = release::stage(&plan)
        .with_context(|| format!("Failed to stage {}", plan.archive_path.display()))?;

    if output::current().json {
        return output::print_json(&staged);
    }

    let verb = if staged.replaced { "Replaced" } else { "Staged" };
    output::success(&format!(
        "{verb} {} ({} files, {})",
        staged.path.display(),
        staged.files.len(),
        output::format_size(staged.size)
    ));
    output::detail(&format!("sha256 {}", staged.sha256));
    Ok(())
}
