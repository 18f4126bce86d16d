//! Plugin index (plugin master) updates
//!
//! The index is a JSON array of plugin entries. A release touches exactly one
//! entry, addressed by position, and leaves every other entry alone.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::defaults::{
    FIELD_ASSEMBLY_VERSION, FIELD_INTERNAL_NAME, FIELD_LAST_UPDATED,
    FIELD_TESTING_ASSEMBLY_VERSION,
};
use crate::core::json::to_pretty_sorted;
use crate::error::IndexError;
use crate::infra::filesystem;

/// Fields to write into the index entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpdate<'a> {
    /// Version copied into `AssemblyVersion` and `TestingAssemblyVersion`
    pub version: &'a str,
    /// Replacement `InternalName`, if any
    pub internal_name: Option<&'a str>,
    /// Current time in epoch seconds
    pub now: u64,
}

/// What the index step changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexUpdate {
    /// Index location
    pub path: PathBuf,
    /// Entry position
    pub entry: usize,
    /// `AssemblyVersion` before the update
    pub previous_version: Option<String>,
    /// `AssemblyVersion` after the update
    pub version: String,
    /// `LastUpdated` after the update
    pub last_updated: u64,
    /// `InternalName` after the update
    pub internal_name: Option<String>,
}

/// Plugin index loaded from disk
#[derive(Debug, Clone)]
pub struct PluginIndex {
    path: PathBuf,
    entries: Vec<Value>,
}

impl PluginIndex {
    /// Load an index from disk
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = filesystem::read_file(path)?;
        Self::from_json(path, &content)
    }

    /// Parse index text; `path` is only used for error messages
    pub fn from_json(path: &Path, content: &str) -> Result<Self, IndexError> {
        let value: Value = serde_json::from_str(content).map_err(|e| IndexError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        match value {
            Value::Array(entries) => Ok(Self {
                path: path.to_path_buf(),
                entries,
            }),
            _ => Err(IndexError::NotAnArray {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow an entry as a JSON object
    pub fn entry(&self, position: usize) -> Result<&Map<String, Value>, IndexError> {
        let len = self.entries.len();
        self.entries
            .get(position)
            .ok_or_else(|| IndexError::EntryOutOfRange {
                path: self.path.clone(),
                entry: position,
                len,
            })?
            .as_object()
            .ok_or_else(|| IndexError::EntryNotAnObject {
                path: self.path.clone(),
                entry: position,
            })
    }

    fn entry_mut(&mut self, position: usize) -> Result<&mut Map<String, Value>, IndexError> {
        let len = self.entries.len();
        let path = self.path.clone();
        self.entries
            .get_mut(position)
            .ok_or_else(|| IndexError::EntryOutOfRange {
                path: path.clone(),
                entry: position,
                len,
            })?
            .as_object_mut()
            .ok_or(IndexError::EntryNotAnObject {
                path,
                entry: position,
            })
    }

    /// Write version, timestamp and optionally InternalName into one entry
    ///
    /// `LastUpdated` never moves backwards: if the entry already carries a
    /// later timestamp than `update.now`, that timestamp is kept.
    pub fn apply(&mut self, position: usize, update: &EntryUpdate<'_>) -> Result<IndexUpdate, IndexError> {
        let path = self.path.clone();
        let entry = self.entry_mut(position)?;

        let previous_version = entry
            .get(FIELD_ASSEMBLY_VERSION)
            .and_then(Value::as_str)
            .map(String::from);
        let previous_updated = entry.get(FIELD_LAST_UPDATED).and_then(Value::as_u64);
        let last_updated = previous_updated.map_or(update.now, |prev| prev.max(update.now));

        if let Some(name) = update.internal_name {
            entry.insert(FIELD_INTERNAL_NAME.to_string(), Value::String(name.to_string()));
        }
        entry.insert(
            FIELD_ASSEMBLY_VERSION.to_string(),
            Value::String(update.version.to_string()),
        );
        entry.insert(
            FIELD_TESTING_ASSEMBLY_VERSION.to_string(),
            Value::String(update.version.to_string()),
        );
        entry.insert(FIELD_LAST_UPDATED.to_string(), Value::from(last_updated));

        let internal_name = entry
            .get(FIELD_INTERNAL_NAME)
            .and_then(Value::as_str)
            .map(String::from);

        Ok(IndexUpdate {
            path,
            entry: position,
            previous_version,
            version: update.version.to_string(),
            last_updated,
            internal_name,
        })
    }

    /// Serialize with sorted keys and 4-space indentation
    pub fn to_json(&self) -> Result<String, IndexError> {
        to_pretty_sorted(&Value::Array(self.entries.clone())).map_err(|e| IndexError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    /// Rewrite the whole index file
    pub fn save(&self) -> Result<(), IndexError> {
        let content = self.to_json()?;
        filesystem::write_file(&self.path, &content)?;
        Ok(())
    }
}

/// Current time as whole epoch seconds
pub fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Load the index, update one entry and write the index back
pub fn update_index(
    path: &Path,
    position: usize,
    update: &EntryUpdate<'_>,
) -> Result<IndexUpdate, IndexError> {
    let mut index = PluginIndex::load(path)?;
    let result = index.apply(position, update)?;
    index.save()?;

    tracing::info!(
        "Updated entry {} of {}: {} -> {}",
        position,
        path.display(),
        result.previous_version.as_deref().unwrap_or("<none>"),
        result.version
    );

    Ok(result)
}
