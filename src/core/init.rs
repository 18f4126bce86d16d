//! Project initialization logic
//!
//! Writes a commented starter `plugstage.toml` and makes sure the build
//! output directories are ignored by git.

use std::path::{Path, PathBuf};

use crate::config::defaults::{CONFIG_FILE, DEFAULT_BUILD_TOOL, DEFAULT_OUTPUT_DIR};
use crate::core::project::ReleaseConfig;
use crate::error::ConfigError;
use crate::infra::filesystem;

/// Entries to add to .gitignore
pub const GITIGNORE_ENTRIES: &[&str] = &["bin/", "obj/"];

/// Marker comment for the plugstage section in .gitignore
pub const GITIGNORE_MARKER: &str = "# plugstage";

/// Options for project initialization
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Project name (derived from the directory when absent)
    pub name: Option<String>,
    /// Overwrite an existing config
    pub force: bool,
}

/// Result of initialization
#[derive(Debug)]
pub struct InitResult {
    /// Path to the written config
    pub config_path: PathBuf,
    /// Project name used
    pub name: String,
    /// Whether .gitignore was created or updated
    pub gitignore_updated: bool,
}

/// Generate the starter config with comments
pub fn generate_config_content(project_name: &str) -> String {
    format!(
        r#"# Plugstage release configuration

[project]
name = "{project_name}"
# Channel used when --channel is not given
default_channel = "stable"

[build]
# Build executable: a path, or a name looked up on PATH
tool = "{DEFAULT_BUILD_TOOL}"
project_file = "{project_name}.sln"
targets = ["Clean", "Restore", "Build"]
configuration = "Release"
# Directory the build writes the plugin and its manifest to
output_dir = "{DEFAULT_OUTPUT_DIR}"
manifest = "{project_name}.json"
# Extra arguments appended to the generated command line
extra_args = []
# Replace the generated command line entirely:
# args = ["{project_name}.sln", "-t:Build", "-p:Configuration=Release"]

[package]
# "stored" or "deflated"
compression = "stored"

[channels.stable]
archive = "plugin/latest.zip"
index = "pluginmaster.json"
# Zero-based position of the plugin entry in the index
entry = 0

# A second channel staging a renamed build next to the stable one:
# [channels.experimental]
# archive = "experimental/latest.zip"
# index = "experimental/pluginmaster.json"
# entry = 1
# internal_name = "{project_name}_Testing"
"#
    )
}

/// Generate .gitignore content for plugstage
pub fn generate_gitignore_content() -> String {
    let mut content = String::from(GITIGNORE_MARKER);
    content.push('\n');
    for entry in GITIGNORE_ENTRIES {
        content.push_str(entry);
        content.push('\n');
    }
    content
}

/// Check if .gitignore already has plugstage entries
pub fn gitignore_has_plugstage_entries(content: &str) -> bool {
    content.contains(GITIGNORE_MARKER)
}

/// Append plugstage entries to existing .gitignore content
pub fn append_gitignore_entries(existing: &str) -> String {
    if gitignore_has_plugstage_entries(existing) {
        return existing.to_string();
    }

    let mut result = existing.to_string();
    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
    if !result.is_empty() {
        result.push('\n');
    }
    result.push_str(&generate_gitignore_content());
    result
}

/// Derive project name from directory
///
/// Relative forms such as `.` are resolved first so they yield the real
/// directory name.
pub fn derive_project_name(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(ToString::to_string)
        .unwrap_or_else(|| "MyPlugin".to_string())
}

/// Write `plugstage.toml` and update `.gitignore`
pub fn init_project(project_dir: &Path, options: &InitOptions) -> Result<InitResult, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    if config_path.exists() && !options.force {
        return Err(ConfigError::AlreadyExists { path: config_path });
    }

    let name = options
        .name
        .clone()
        .unwrap_or_else(|| derive_project_name(project_dir));
    let content = generate_config_content(&name);

    // Never write a config we could not load back
    ReleaseConfig::from_toml(&content)
        .map_err(|e| ConfigError::ParseError {
            path: config_path.clone(),
            error: e.to_string(),
        })?
        .validate()?;

    filesystem::write_file(&config_path, &content).map_err(|e| ConfigError::WriteError {
        path: config_path.clone(),
        error: e.to_string(),
    })?;

    let gitignore_path = project_dir.join(".gitignore");
    let existing = if gitignore_path.exists() {
        filesystem::read_file(&gitignore_path).map_err(|e| ConfigError::ReadError {
            path: gitignore_path.clone(),
            error: e.to_string(),
        })?
    } else {
        String::new()
    };
    let updated = append_gitignore_entries(&existing);
    let gitignore_updated = updated != existing;
    if gitignore_updated {
        filesystem::write_file(&gitignore_path, &updated).map_err(|e| {
            ConfigError::WriteError {
                path: gitignore_path.clone(),
                error: e.to_string(),
            }
        })?;
    }

    tracing::info!("Wrote {}", config_path.display());

    Ok(InitResult {
        config_path,
        name,
        gitignore_updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_is_valid() {
        let content = generate_config_content("TriadBuddy");
        let config = ReleaseConfig::from_toml(&content).unwrap();
        config.validate().unwrap();

        assert_eq!(config.project.name, "TriadBuddy");
        assert_eq!(config.project_file(), "TriadBuddy.sln");
        assert_eq!(config.channel_names(), vec!["stable"]);
    }

    #[test]
    fn test_generate_gitignore_content() {
        let content = generate_gitignore_content();
        assert!(content.contains(GITIGNORE_MARKER));
        assert!(content.contains("bin/"));
        assert!(content.contains("obj/"));
    }

    #[test]
    fn test_append_gitignore_entries_to_existing() {
        let existing = "*.user\n.vs/";
        let result = append_gitignore_entries(existing);
        assert!(result.starts_with("*.user\n.vs/\n\n# plugstage"));
    }

    #[test]
    fn test_append_gitignore_entries_idempotent() {
        let first = append_gitignore_entries("*.user\n");
        let second = append_gitignore_entries(&first);
        assert_eq!(first, second, "Appending should be idempotent");
    }

    #[test]
    fn test_derive_project_name() {
        let path = Path::new("/home/user/TriadBuddy");
        assert_eq!(derive_project_name(path), "TriadBuddy");
    }

    #[test]
    fn test_derive_project_name_resolves_parent_components() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("TriadBuddy/src")).unwrap();

        let path = temp.path().join("TriadBuddy/src/..");
        assert_eq!(derive_project_name(&path), "TriadBuddy");
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "keep me").unwrap();

        let err = init_project(temp.path(), &InitOptions::default()).unwrap_err();

        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        assert_eq!(
            std::fs::read_to_string(temp.path().join(CONFIG_FILE)).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "old").unwrap();
        let options = InitOptions {
            name: Some("Demo".to_string()),
            force: true,
        };

        let result = init_project(temp.path(), &options).unwrap();

        assert_eq!(result.name, "Demo");
        assert!(result.gitignore_updated);
        assert!(ReleaseConfig::load(temp.path()).is_ok());
    }
}
