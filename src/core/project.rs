//! Project configuration (`plugstage.toml`)
//!
//! Describes how to build the plugin, where the build writes its output and
//! manifest, and one or more release channels. A channel names the staged
//! archive path, the plugin index file and the index entry it updates.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    CONFIG_FILE, DEFAULT_BUILD_TOOL, DEFAULT_CONFIGURATION, DEFAULT_OUTPUT_DIR, DEFAULT_TARGETS,
};
use crate::error::ConfigError;

/// Parsed `plugstage.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Project metadata
    pub project: ProjectSection,

    /// Build tool settings
    #[serde(default)]
    pub build: BuildSection,

    /// Archive settings
    #[serde(default)]
    pub package: PackageSection,

    /// Release channels by name
    #[serde(default)]
    pub channels: BTreeMap<String, Channel>,
}

/// `[project]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Project name, also the default stem of the solution and manifest files
    pub name: String,

    /// Channel used when `--channel` is not given
    pub default_channel: Option<String>,
}

/// `[build]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSection {
    /// Build executable (path or bare name on PATH)
    pub tool: Option<String>,

    /// Solution or project file handed to the tool
    pub project_file: Option<String>,

    /// Build targets
    pub targets: Option<Vec<String>>,

    /// Build configuration
    pub configuration: Option<String>,

    /// Directory the build writes its output to
    pub output_dir: Option<String>,

    /// Manifest file name inside `output_dir`
    pub manifest: Option<String>,

    /// Arguments appended after the generated ones
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Full argument list, replacing the generated one
    pub args: Option<Vec<String>>,
}

/// `[package]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageSection {
    /// Compression used for archive entries
    #[serde(default)]
    pub compression: Compression,
}

/// Archive entry compression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// No compression
    #[default]
    Stored,
    /// Deflate compression
    Deflated,
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stored => write!(f, "stored"),
            Self::Deflated => write!(f, "deflated"),
        }
    }
}

/// `[channels.<name>]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Where the packaged zip is staged
    pub archive: String,

    /// Plugin index (plugin master) file
    pub index: String,

    /// Zero-based position of the entry to update
    #[serde(default)]
    pub entry: usize,

    /// InternalName written to the manifest and the index entry
    pub internal_name: Option<String>,
}

/// Resolved command line for the external build tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInvocation {
    /// Executable
    pub tool: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory
    pub working_dir: PathBuf,
}

impl BuildInvocation {
    /// Render the invocation as a single shell-like line
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(quote(&self.tool));
        parts.extend(self.args.iter().map(|a| quote(a)));
        parts.join(" ")
    }
}

fn quote(part: &str) -> String {
    if part.contains(char::is_whitespace) {
        format!("\"{part}\"")
    } else {
        part.to_string()
    }
}

impl ReleaseConfig {
    /// Load `plugstage.toml` from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        Self::load_from_path(&path)
    }

    /// Load and validate a config file from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let config = Self::from_toml(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from TOML text without validating it
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check the config for values that would make a release impossible
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("project.name", &self.project.name)?;

        if let Some(dir) = &self.build.output_dir {
            require_non_empty("build.output_dir", dir)?;
        }
        if let Some(tool) = &self.build.tool {
            require_non_empty("build.tool", tool)?;
        }
        if let Some(manifest) = &self.build.manifest {
            require_non_empty("build.manifest", manifest)?;
        }

        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }

        if let Some(default) = &self.project.default_channel {
            if !self.channels.contains_key(default) {
                return Err(ConfigError::UnknownChannel {
                    name: default.clone(),
                    available: self.channel_names(),
                });
            }
        }

        for (name, channel) in &self.channels {
            require_non_empty(&format!("channels.{name}.archive"), &channel.archive)?;
            require_non_empty(&format!("channels.{name}.index"), &channel.index)?;
            if let Some(internal_name) = &channel.internal_name {
                require_non_empty(&format!("channels.{name}.internal_name"), internal_name)?;
            }
        }

        Ok(())
    }

    /// Names of all configured channels, sorted
    pub fn channel_names(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }

    /// Pick the channel to release to
    ///
    /// Order: the requested name, then `project.default_channel`, then the
    /// only channel if exactly one exists.
    pub fn resolve_channel(&self, requested: Option<&str>) -> Result<(&str, &Channel), ConfigError> {
        let name = match requested.or(self.project.default_channel.as_deref()) {
            Some(name) => name,
            None if self.channels.len() == 1 => {
                let (name, channel) = self
                    .channels
                    .iter()
                    .next()
                    .ok_or(ConfigError::NoChannels)?;
                return Ok((name.as_str(), channel));
            }
            None if self.channels.is_empty() => return Err(ConfigError::NoChannels),
            None => {
                return Err(ConfigError::AmbiguousChannel {
                    available: self.channel_names(),
                })
            }
        };

        self.channels
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownChannel {
                name: name.to_string(),
                available: self.channel_names(),
            })
    }

    /// Effective build executable
    pub fn build_tool(&self) -> &str {
        self.build.tool.as_deref().unwrap_or(DEFAULT_BUILD_TOOL)
    }

    /// Effective solution/project file
    pub fn project_file(&self) -> String {
        self.build
            .project_file
            .clone()
            .unwrap_or_else(|| format!("{}.sln", self.project.name))
    }

    /// Effective build configuration
    pub fn configuration(&self) -> &str {
        self.build
            .configuration
            .as_deref()
            .unwrap_or(DEFAULT_CONFIGURATION)
    }

    /// Effective build targets
    pub fn targets(&self) -> Vec<String> {
        self.build.targets.clone().unwrap_or_else(|| {
            DEFAULT_TARGETS.iter().map(|t| (*t).to_string()).collect()
        })
    }

    /// Arguments handed to the build tool
    ///
    /// Without an explicit `args` list this is
    /// `<project_file> -t:<targets> -p:Configuration=<configuration>`
    /// followed by `extra_args`.
    pub fn build_args(&self) -> Vec<String> {
        if let Some(args) = &self.build.args {
            return args.clone();
        }

        let mut args = vec![self.project_file()];
        let targets = self.targets();
        if !targets.is_empty() {
            args.push(format!("-t:{}", targets.join(",")));
        }
        args.push(format!("-p:Configuration={}", self.configuration()));
        args.extend(self.build.extra_args.iter().cloned());
        args
    }

    /// Build invocation rooted at `project_dir`
    pub fn build_invocation(&self, project_dir: &Path) -> BuildInvocation {
        BuildInvocation {
            tool: self.build_tool().to_string(),
            args: self.build_args(),
            working_dir: project_dir.to_path_buf(),
        }
    }

    /// Build output directory
    pub fn output_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(self.build.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
    }

    /// Build manifest path inside the output directory
    pub fn manifest_path(&self, project_dir: &Path) -> PathBuf {
        let name = self
            .build
            .manifest
            .clone()
            .unwrap_or_else(|| format!("{}.json", self.project.name));
        self.output_dir(project_dir).join(name)
    }
}

impl Channel {
    /// Staged archive path
    pub fn archive_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.archive)
    }

    /// Plugin index path
    pub fn index_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.index)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyField {
            field: field.to_string(),
        });
    }
    Ok(())
}
