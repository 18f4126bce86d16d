//! Check command logic
//!
//! Inspects a resolved release plan without building or writing anything:
//! is the build tool reachable, does the manifest carry a version, does the
//! index have the addressed entry.

use serde::Serialize;

use crate::core::manifest;
use crate::core::plugin_index::PluginIndex;
use crate::core::release::ReleasePlan;
use crate::infra::build_tool;

/// Result of the check operation
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    /// Whether the build tool could be located
    pub build_tool_available: bool,
    /// Version found in the current build manifest, if any
    pub manifest_version: Option<String>,
    /// Whether the plugin index has the addressed entry
    pub index_entry_valid: bool,
    /// Problems that will make a release fail
    pub errors: Vec<String>,
    /// Problems that a build may still fix
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// Check if nothing would stop a release
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Perform check operation on a plan
pub fn check(plan: &ReleasePlan) -> CheckResult {
    let mut result = CheckResult::default();

    match build_tool::resolve_tool(&plan.build.tool, &plan.build.working_dir) {
        Ok(path) => {
            tracing::debug!("Build tool found at {}", path.display());
            result.build_tool_available = true;
        }
        // Missing tools are common on machines that only stage releases
        Err(e) => result.warnings.push(e.to_string()),
    }

    // The manifest only exists after a build, so its absence is not fatal
    if plan.manifest_path.exists() {
        match manifest::read_version(&plan.manifest_path) {
            Ok(version) => result.manifest_version = Some(version),
            Err(e) => result.warnings.push(e.to_string()),
        }
    } else {
        result.warnings.push(format!(
            "Build manifest {} does not exist yet",
            plan.manifest_path.display()
        ));
    }

    match PluginIndex::load(&plan.index_path).and_then(|index| index.entry(plan.entry).map(|_| ())) {
        Ok(()) => result.index_entry_valid = true,
        Err(e) => result.errors.push(e.to_string()),
    }

    result
}
