//! CLI implementation for `plugstage manifest`
//!
//! Reads the build version and applies the channel's InternalName override.

use std::path::Path;

use anyhow::{Context, Result};

use super::load_plan;
use crate::cli::output;
use crate::core::release;

/// Execute the manifest command
pub async fn execute(project_dir: &Path, channel: Option<&str>) -> Result<()> {
    let plan = load_plan(project_dir, channel)?;
    let info = release::patch_manifest(&plan).with_context(|| {
        format!("Failed to patch manifest {}", plan.manifest_path.display())
    })?;

    if output::current().json {
        return output::print_json(&info);
    }

    output::success(&format!("Build version: {}", info.version));
    if let Some(name) = &info.internal_name {
        if info.renamed {
            output::detail(&format!("InternalName set to {name}"));
        } else {
            output::detail(&format!("InternalName: {name}"));
        }
    }
    Ok(())
}
