//! Build manifest handling
//!
//! The build emits a flat JSON object describing the plugin. We read its
//! `AssemblyVersion`, optionally replace `InternalName`, and write it back
//! with sorted keys. Keys we do not know about are kept as-is.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::defaults::{FIELD_ASSEMBLY_VERSION, FIELD_INTERNAL_NAME};
use crate::core::json::to_pretty_sorted;
use crate::error::ManifestError;
use crate::infra::filesystem;

/// Build manifest loaded from disk
#[derive(Debug, Clone)]
pub struct BuildManifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

/// What the manifest step produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestInfo {
    /// Manifest location
    pub path: PathBuf,
    /// Build version read from `AssemblyVersion`
    pub version: String,
    /// `InternalName` after patching, if any
    pub internal_name: Option<String>,
    /// Whether `InternalName` was rewritten
    pub renamed: bool,
}

impl BuildManifest {
    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = filesystem::read_file(path)?;
        Self::from_json(path, &content)
    }

    /// Parse manifest text; `path` is only used for error messages
    pub fn from_json(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Manifest location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `AssemblyVersion` string
    pub fn version(&self) -> Result<&str, ManifestError> {
        self.fields
            .get(FIELD_ASSEMBLY_VERSION)
            .and_then(Value::as_str)
            .ok_or_else(|| ManifestError::MissingVersion {
                path: self.path.clone(),
                field: FIELD_ASSEMBLY_VERSION.to_string(),
            })
    }

    /// The `InternalName` string, if present
    pub fn internal_name(&self) -> Option<&str> {
        self.fields.get(FIELD_INTERNAL_NAME).and_then(Value::as_str)
    }

    /// Replace `InternalName`
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_internal_name(&mut self, name: &str) -> bool {
        let changed = self.internal_name() != Some(name);
        self.fields.insert(
            FIELD_INTERNAL_NAME.to_string(),
            Value::String(name.to_string()),
        );
        changed
    }

    /// Serialize with sorted keys and 4-space indentation
    pub fn to_json(&self) -> Result<String, ManifestError> {
        to_pretty_sorted(&Value::Object(self.fields.clone())).map_err(|e| ManifestError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    /// Write the manifest back to where it was loaded from
    pub fn save(&self) -> Result<(), ManifestError> {
        let content = self.to_json()?;
        filesystem::write_file(&self.path, &content)?;
        Ok(())
    }
}

/// Read the version from the manifest, apply the InternalName override and
/// write the manifest back
pub fn patch_manifest(
    path: &Path,
    internal_name: Option<&str>,
) -> Result<ManifestInfo, ManifestError> {
    let mut manifest = BuildManifest::load(path)?;
    let version = manifest.version()?.to_string();
    tracing::info!("Using build version: {version}");

    let renamed = match internal_name {
        Some(name) => {
            tracing::info!("Using build name: {name}");
            manifest.set_internal_name(name)
        }
        None => false,
    };

    manifest.save()?;
    tracing::debug!("Rewrote manifest {}", path.display());

    Ok(ManifestInfo {
        path: path.to_path_buf(),
        version,
        internal_name: manifest.internal_name().map(String::from),
        renamed,
    })
}

/// Read the version without modifying the manifest
pub fn read_version(path: &Path) -> Result<String, ManifestError> {
    let manifest = BuildManifest::load(path)?;
    manifest.version().map(String::from)
}
