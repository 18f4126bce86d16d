//! Release pipeline
//!
//! Resolves the config into a [`ReleasePlan`] and runs the four steps in
//! order: build, manifest patch, packaging, index update. Each step hands its
//! result to the next; nothing is shared through globals.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::manifest::{self, ManifestInfo};
use crate::core::plugin_index::{self, EntryUpdate, IndexUpdate};
use crate::core::project::{BuildInvocation, Compression, ReleaseConfig};
use crate::error::{ConfigError, PlugstageError};
use crate::infra::archive::{self, StagedArchive};
use crate::infra::build_tool::{self, BuildOutput, BuildReport};

/// Everything a release needs, with paths resolved
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
    /// Channel name
    pub channel: String,
    /// Build tool command
    pub build: BuildInvocation,
    /// Build output directory
    pub output_dir: PathBuf,
    /// Build manifest path
    pub manifest_path: PathBuf,
    /// Archive entry compression
    pub compression: Compression,
    /// Staged archive path
    pub archive_path: PathBuf,
    /// Plugin index path
    pub index_path: PathBuf,
    /// Index entry position
    pub entry: usize,
    /// InternalName override
    pub internal_name: Option<String>,
}

impl ReleasePlan {
    /// Resolve a plan for `channel` (or the default channel)
    pub fn resolve(
        config: &ReleaseConfig,
        project_dir: &Path,
        channel: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let (name, channel) = config.resolve_channel(channel)?;

        Ok(Self {
            channel: name.to_string(),
            build: config.build_invocation(project_dir),
            output_dir: config.output_dir(project_dir),
            manifest_path: config.manifest_path(project_dir),
            compression: config.package.compression,
            archive_path: channel.archive_path(project_dir),
            index_path: channel.index_path(project_dir),
            entry: channel.entry,
            internal_name: channel.internal_name.clone(),
        })
    }
}

/// Pipeline options
#[derive(Debug, Clone, Copy)]
pub struct ReleaseOptions {
    /// Reuse the existing build output
    pub skip_build: bool,
    /// How build tool output is shown
    pub build_output: BuildOutput,
    /// Fixed `LastUpdated` in epoch seconds; the clock is read at the index
    /// step when unset
    pub now: Option<u64>,
}

/// Result of a full release
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    /// Channel released to
    pub channel: String,
    /// Build step result, absent when skipped
    pub build: Option<BuildReport>,
    /// Manifest step result
    pub manifest: ManifestInfo,
    /// Packaging step result
    pub archive: StagedArchive,
    /// Index step result
    pub index: IndexUpdate,
}

/// Patch the manifest for `plan`
pub fn patch_manifest(plan: &ReleasePlan) -> Result<ManifestInfo, PlugstageError> {
    Ok(manifest::patch_manifest(
        &plan.manifest_path,
        plan.internal_name.as_deref(),
    )?)
}

/// Package and stage the build output for `plan`
pub fn stage(plan: &ReleasePlan) -> Result<StagedArchive, PlugstageError> {
    Ok(archive::package_and_stage(
        &plan.output_dir,
        &plan.archive_path,
        plan.compression,
    )?)
}

/// Update the plan's index entry to `version`
pub fn update_index(
    plan: &ReleasePlan,
    version: &str,
    now: u64,
) -> Result<IndexUpdate, PlugstageError> {
    let update = EntryUpdate {
        version,
        internal_name: plan.internal_name.as_deref(),
        now,
    };
    Ok(plugin_index::update_index(
        &plan.index_path,
        plan.entry,
        &update,
    )?)
}

/// Run all four steps
pub async fn run_release(
    plan: &ReleasePlan,
    options: ReleaseOptions,
) -> Result<ReleaseReport, PlugstageError> {
    tracing::info!("Releasing to channel '{}'", plan.channel);

    let build = if options.skip_build {
        tracing::info!("Skipping build");
        None
    } else {
        Some(build_tool::run_build(&plan.build, options.build_output).await?)
    };

    let manifest = patch_manifest(plan)?;
    let archive = stage(plan)?;
    let now = options
        .now
        .unwrap_or_else(plugin_index::current_epoch_seconds);
    let index = update_index(plan, &manifest.version, now)?;

    Ok(ReleaseReport {
        channel: plan.channel.clone(),
        build,
        manifest,
        archive,
        index,
    })
}
