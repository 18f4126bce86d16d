//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with config, index and a fake build tool
    pub fn with_release_setup() -> Self {
        let project = Self::new();
        project.create_file("plugstage.toml", SAMPLE_CONFIG);
        project.create_file("pluginmaster.json", SAMPLE_STABLE_INDEX);
        project.create_file("experimental/pluginmaster.json", SAMPLE_EXPERIMENTAL_INDEX);
        project.create_executable("tools/fake-build.sh", FAKE_BUILD_SCRIPT);
        project.create_executable("tools/failing-build.sh", FAILING_BUILD_SCRIPT);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create an executable script in the test project
    pub fn create_executable(&self, name: &str, content: &str) {
        self.create_file(name, content);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let path = self.dir.path().join(name);
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make script executable");
        }
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Parse a JSON file from the test project
    pub fn read_json(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(name)).expect("Failed to parse JSON")
    }

    /// Entry names of a zip archive in the test project
    pub fn zip_entries(&self, name: &str) -> Vec<String> {
        let file = std::fs::File::open(self.dir.path().join(name)).expect("Failed to open zip");
        let archive = zip::ZipArchive::new(file).expect("Failed to read zip");
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Write build output as the fake build tool would
    pub fn create_build_output(&self, version: &str) {
        self.create_file(
            "bin/x64/Release/Demo.json",
            &format!(r#"{{"AssemblyVersion": "{version}", "InternalName": "Demo", "Name": "Demo Plugin"}}"#),
        );
        self.create_file("bin/x64/Release/Demo.dll", "dll");
        self.create_file("bin/x64/Release/ref/Demo.dll", "reference assembly");
    }

    /// Run plugstage in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_plugstage"));
        cmd.current_dir(self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd.env_remove("PLUGSTAGE_PROJECT_DIR");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute plugstage")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Format output for assertion messages
pub fn describe(output: &Output) -> String {
    format!(
        "status={:?} stdout={} stderr={}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Sample config with a stable and an experimental channel
pub const SAMPLE_CONFIG: &str = r#"
[project]
name = "Demo"
default_channel = "stable"

[build]
tool = "tools/fake-build.sh"
project_file = "Demo.sln"
output_dir = "bin/x64/Release"

[channels.stable]
archive = "plugin/latest.zip"
index = "pluginmaster.json"
entry = 0

[channels.experimental]
archive = "experimental/api4/latest.zip"
index = "experimental/pluginmaster.json"
entry = 1
internal_name = "Demo_A4"
"#;

/// Stable plugin index with one entry
pub const SAMPLE_STABLE_INDEX: &str = r#"[
    {
        "AssemblyVersion": "1.0.0",
        "InternalName": "Demo",
        "LastUpdated": 1600000000,
        "Name": "Demo Plugin",
        "TestingAssemblyVersion": "1.0.0"
    }
]"#;

/// Experimental plugin index with two entries
pub const SAMPLE_EXPERIMENTAL_INDEX: &str = r#"[
    {
        "AssemblyVersion": "0.9.0",
        "InternalName": "Demo",
        "LastUpdated": 1500000000
    },
    {
        "AssemblyVersion": "1.0.0",
        "InternalName": "Demo",
        "LastUpdated": 1600000000
    }
]"#;

/// Build tool stand-in that writes a manifest and a plugin binary
pub const FAKE_BUILD_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > build-args.txt
mkdir -p bin/x64/Release/ref
cat > bin/x64/Release/Demo.json <<'JSON'
{"AssemblyVersion": "1.2.3", "InternalName": "Demo", "Name": "Demo Plugin"}
JSON
printf 'dll' > bin/x64/Release/Demo.dll
printf 'ref' > bin/x64/Release/ref/Demo.dll
"#;

/// Build tool stand-in that always fails
pub const FAILING_BUILD_SCRIPT: &str = r#"#!/bin/sh
echo "error CS1002: ; expected" >&2
exit 1
"#;
