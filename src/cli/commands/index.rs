//! CLI implementation for `plugstage index`
//!
//! Refreshes the channel's plugin index entry.

use std::path::Path;

use anyhow::{Context, Result};

use super::load_plan;
use crate::cli::output;
use crate::core::{manifest, plugin_index, release};

/// Execute the index command
///
/// Without `version` the build version is read from the manifest, which is
/// left unmodified.
pub async fn execute(project_dir: &Path, channel: Option<&str>, version: Option<&str>) -> Result<()> {
    let plan = load_plan(project_dir, channel)?;

    let version = match version {
        Some(v) => v.to_string(),
        None => manifest::read_version(&plan.manifest_path).with_context(|| {
            format!(
                "Failed to read version from {}",
                plan.manifest_path.display()
            )
        })?,
    };

    let update = release::update_index(&plan, &version, plugin_index::current_epoch_seconds())
        .with_context(|| format!("Failed to update {}", plan.index_path.display()))?;

    if output::current().json {
        return output::print_json(&update);
    }

    output::success(&format!(
        "Updated entry {} of {}",
        update.entry,
        update.path.display()
    ));
    output::detail(&format!(
        "AssemblyVersion: {} -> {}",
        update.previous_version.as_deref().unwrap_or("<none>"),
        update.version
    ));
    output::detail(&format!("LastUpdated: {}", update.last_updated));
    Ok(())
}
