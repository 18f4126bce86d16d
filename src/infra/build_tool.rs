//! External build tool invocation
//!
//! Runs the configured build executable to completion and turns a non-zero
//! exit status into an error.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use serde::Serialize;
use tokio::process::Command;

use crate::core::project::BuildInvocation;
use crate::error::BuildToolError;

/// How the child's stdout/stderr are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutput {
    /// Stream straight to the terminal
    Inherit,
    /// Capture and forward to tracing
    Capture,
}

/// Outcome of a successful build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Command that was run
    pub command_line: String,
    /// Exit code, if the platform reported one
    pub exit_code: Option<i32>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// Locate the build executable
///
/// Paths with a directory component are taken relative to `working_dir`;
/// bare names are looked up on PATH.
pub fn resolve_tool(tool: &str, working_dir: &Path) -> Result<PathBuf, BuildToolError> {
    let candidate = Path::new(tool);
    if candidate.is_absolute() || candidate.components().count() > 1 {
        let path = working_dir.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
        return Err(BuildToolError::NotFound {
            tool: tool.to_string(),
            error: format!("{} does not exist", path.display()),
        });
    }

    which::which(tool).map_err(|e| BuildToolError::NotFound {
        tool: tool.to_string(),
        error: e.to_string(),
    })
}

/// Run the build tool and wait for it to exit
pub async fn run_build(
    invocation: &BuildInvocation,
    output: BuildOutput,
) -> Result<BuildReport, BuildToolError> {
    let executable = resolve_tool(&invocation.tool, &invocation.working_dir)?;
    let command_line = invocation.command_line();
    tracing::info!("Running build: {command_line}");

    let mut cmd = Command::new(&executable);
    cmd.args(&invocation.args)
        .current_dir(&invocation.working_dir)
        .stdin(Stdio::null());

    let started = Instant::now();
    let status = match output {
        BuildOutput::Inherit => cmd.status().await.map_err(|e| io_error(invocation, &e))?,
        BuildOutput::Capture => {
            let out = cmd.output().await.map_err(|e| io_error(invocation, &e))?;
            forward_lines(&String::from_utf8_lossy(&out.stdout), out.status.success());
            forward_lines(&String::from_utf8_lossy(&out.stderr), out.status.success());
            out.status
        }
    };
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    check_status(&invocation.tool, status)?;
    tracing::info!("Build finished in {duration_ms} ms");

    Ok(BuildReport {
        command_line,
        exit_code: status.code(),
        duration_ms,
    })
}

fn check_status(tool: &str, status: ExitStatus) -> Result<(), BuildToolError> {
    if status.success() {
        return Ok(());
    }
    Err(BuildToolError::Failed {
        tool: tool.to_string(),
        status: status.to_string(),
    })
}

fn io_error(invocation: &BuildInvocation, error: &std::io::Error) -> BuildToolError {
    BuildToolError::IoError {
        tool: invocation.tool.clone(),
        error: error.to_string(),
    }
}

fn forward_lines(text: &str, success: bool) {
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if success {
            tracing::debug!(target: "build", "{line}");
        } else {
            tracing::warn!(target: "build", "{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_missing_relative_tool() {
        let temp = TempDir::new().unwrap();
        let err = resolve_tool("tools/msbuild.exe", temp.path()).unwrap_err();
        assert!(matches!(err, BuildToolError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_missing_bare_tool() {
        let temp = TempDir::new().unwrap();
        let err = resolve_tool("definitely-not-a-real-build-tool-xyz", temp.path()).unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-build-tool-xyz"));
    }

    #[test]
    fn test_resolve_relative_tool() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("tools")).unwrap();
        std::fs::write(temp.path().join("tools/build.sh"), "#!/bin/sh\n").unwrap();

        let path = resolve_tool("tools/build.sh", temp.path()).unwrap();
        assert_eq!(path, temp.path().join("tools/build.sh"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_build_reports_failure() {
        let temp = TempDir::new().unwrap();
        let invocation = BuildInvocation {
            tool: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 3".to_string()],
            working_dir: temp.path().to_path_buf(),
        };

        let err = run_build(&invocation, BuildOutput::Capture).await.unwrap_err();
        assert!(matches!(err, BuildToolError::Failed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_build_in_working_dir() {
        let temp = TempDir::new().unwrap();
        let invocation = BuildInvocation {
            tool: "sh".to_string(),
            args: vec!["-c".to_string(), "echo built > marker.txt".to_string()],
            working_dir: temp.path().to_path_buf(),
        };

        let report = run_build(&invocation, BuildOutput::Capture).await.unwrap();

        assert_eq!(report.exit_code, Some(0));
        assert!(temp.path().join("marker.txt").exists());
    }
}
