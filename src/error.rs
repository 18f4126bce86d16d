//! Error types for plugstage
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Project configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("No plugstage.toml found at '{path}'. Run 'plugstage init' to create one.")]
    NotFound { path: PathBuf },

    /// Config file could not be read
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Config file is not valid TOML or has the wrong shape
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Config file could not be written
    #[error("Failed to write config file '{path}': {error}")]
    WriteError { path: PathBuf, error: String },

    /// Config file already exists
    #[error("Config file already exists at '{path}'. Use --force to overwrite it")]
    AlreadyExists { path: PathBuf },

    /// A required field is empty
    #[error("Config field '{field}' must not be empty")]
    EmptyField { field: String },

    /// No channels are defined
    #[error("No release channels defined. Add a [channels.<name>] section")]
    NoChannels,

    /// Channel does not exist
    #[error("Channel '{name}' not found. Available channels: {}", available.join(", "))]
    UnknownChannel { name: String, available: Vec<String> },

    /// Several channels and nothing to pick one
    #[error("Several channels defined ({}). Pass --channel or set project.default_channel", available.join(", "))]
    AmbiguousChannel { available: Vec<String> },
}

/// External build tool errors
#[derive(Error, Debug)]
pub enum BuildToolError {
    /// Executable could not be located or started
    #[error("Build tool '{tool}' not found: {error}")]
    NotFound { tool: String, error: String },

    /// Build tool ran but reported failure
    #[error("Build tool '{tool}' failed with {status}")]
    Failed { tool: String, status: String },

    /// Waiting on the child process failed
    #[error("IO error while running '{tool}': {error}")]
    IoError { tool: String, error: String },
}

/// Build manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest was not produced by the build
    #[error("Build manifest not found at '{path}'. Did the build succeed?")]
    NotFound { path: PathBuf },

    /// Manifest is not valid JSON
    #[error("Failed to parse build manifest '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Manifest root is not a JSON object
    #[error("Build manifest '{path}' is not a JSON object")]
    NotAnObject { path: PathBuf },

    /// AssemblyVersion missing or not a string
    #[error("Build manifest '{path}' has no string field '{field}'")]
    MissingVersion { path: PathBuf, field: String },

    /// Filesystem failure while reading or writing
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Archive packaging errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Output directory missing
    #[error("Build output directory not found: {path}")]
    OutputDirNotFound { path: PathBuf },

    /// Zip writer failure
    #[error("Failed to write archive '{path}': {error}")]
    Zip { path: PathBuf, error: String },

    /// Moving the archive into place failed
    #[error("Failed to stage archive '{from}' at '{to}': {error}")]
    Stage {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Filesystem failure while collecting files
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Plugin index errors
#[derive(Error, Debug)]
pub enum IndexError {
    /// Index file missing
    #[error("Plugin index not found at '{path}'")]
    NotFound { path: PathBuf },

    /// Index is not valid JSON
    #[error("Failed to parse plugin index '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Index root is not an array
    #[error("Plugin index '{path}' is not a JSON array")]
    NotAnArray { path: PathBuf },

    /// Entry position past the end of the array
    #[error("Plugin index '{path}' has {len} entries, entry {entry} does not exist")]
    EntryOutOfRange {
        path: PathBuf,
        entry: usize,
        len: usize,
    },

    /// Entry is not an object
    #[error("Entry {entry} of plugin index '{path}' is not a JSON object")]
    EntryNotAnObject { path: PathBuf, entry: usize },

    /// Filesystem failure while reading or writing
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to list directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },
}

/// Top-level plugstage error type
#[derive(Error, Debug)]
pub enum PlugstageError {
    /// Build tool error
    #[error("Build error: {0}")]
    BuildTool(#[from] BuildToolError),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Archive error
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Index error
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}
