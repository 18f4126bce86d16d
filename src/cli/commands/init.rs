//! CLI implementation for `plugstage init`

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output;
use crate::core::init::{init_project, InitOptions};

/// Execute the init command
pub async fn execute(project_dir: &Path, name: Option<String>, force: bool) -> Result<()> {
    let options = InitOptions { name, force };
    let result = init_project(project_dir, &options).with_context(|| {
        format!("Failed to initialize {}", project_dir.display())
    })?;

    output::success(&format!(
        "Created {} for '{}'",
        result.config_path.display(),
        result.name
    ));
    if result.gitignore_updated {
        output::detail("Updated .gitignore");
    }
    output::detail("Edit the [build] and [channels] sections, then run 'plugstage check'");
    Ok(())
}
