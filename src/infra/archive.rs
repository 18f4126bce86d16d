//! Zip packaging and staging of build output
//!
//! The top-level files of the build output directory are zipped into a
//! scratch archive next to them, which is then moved onto the staging path.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::defaults::TEMP_ARCHIVE_NAME;
use crate::core::project::Compression;
use crate::error::{ArchiveError, FilesystemError};
use crate::infra::filesystem;

/// A staged release archive
#[derive(Debug, Clone, Serialize)]
pub struct StagedArchive {
    /// Where the archive now lives
    pub path: PathBuf,
    /// Entry names, in archive order
    pub files: Vec<String>,
    /// Archive size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive
    pub sha256: String,
    /// Whether a previously staged archive was replaced
    pub replaced: bool,
}

impl From<Compression> for CompressionMethod {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Stored => Self::Stored,
            Compression::Deflated => Self::Deflated,
        }
    }
}

/// Zip every top-level regular file of `output_dir` into the scratch archive
///
/// Any stale scratch archive is removed first and never packs itself.
/// Returns the scratch archive path and the entry names written.
pub fn build_archive(
    output_dir: &Path,
    compression: Compression,
) -> Result<(PathBuf, Vec<String>), ArchiveError> {
    if !output_dir.is_dir() {
        return Err(ArchiveError::OutputDirNotFound {
            path: output_dir.to_path_buf(),
        });
    }

    let temp_path = output_dir.join(TEMP_ARCHIVE_NAME);
    if filesystem::remove_file_if_exists(&temp_path)? {
        tracing::debug!("Removed stale {}", temp_path.display());
    }

    let sources: Vec<PathBuf> = filesystem::list_top_level_files(output_dir)?
        .into_iter()
        .filter(|p| p.file_name().is_some_and(|n| n != TEMP_ARCHIVE_NAME))
        .collect();

    let zip_err = |e: &dyn std::fmt::Display| ArchiveError::Zip {
        path: temp_path.clone(),
        error: e.to_string(),
    };

    let file = File::create(&temp_path).map_err(|e| zip_err(&e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(compression.into());

    let mut names = Vec::with_capacity(sources.len());
    for source in &sources {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = filesystem::read_bytes(source)?;

        zip.start_file(name.as_str(), options).map_err(|e| zip_err(&e))?;
        zip.write_all(&data).map_err(|e| zip_err(&e))?;
        tracing::debug!("Packed {name} ({} bytes)", data.len());
        names.push(name);
    }

    zip.finish().map_err(|e| zip_err(&e))?;
    tracing::info!("Packed {} files into {}", names.len(), temp_path.display());

    Ok((temp_path, names))
}

/// Move `archive` onto `staged_path`, replacing whatever was staged before
///
/// Returns `true` if an older archive was replaced.
pub fn stage_archive(archive: &Path, staged_path: &Path) -> Result<bool, ArchiveError> {
    if let Some(parent) = staged_path.parent() {
        if !parent.as_os_str().is_empty() {
            filesystem::create_dir_all(parent)?;
        }
    }

    let replaced = filesystem::remove_file_if_exists(staged_path)?;
    std::fs::rename(archive, staged_path).map_err(|e| ArchiveError::Stage {
        from: archive.to_path_buf(),
        to: staged_path.to_path_buf(),
        error: e.to_string(),
    })?;

    tracing::info!("Staged {}", staged_path.display());
    Ok(replaced)
}

/// Hex SHA-256 and size of a file
pub fn digest_file(path: &Path) -> Result<(String, u64), FilesystemError> {
    let data = filesystem::read_bytes(path)?;
    let hash = Sha256::digest(&data);
    Ok((hex::encode(hash), data.len() as u64))
}

/// Package the build output and stage it
pub fn package_and_stage(
    output_dir: &Path,
    staged_path: &Path,
    compression: Compression,
) -> Result<StagedArchive, ArchiveError> {
    let (temp_path, files) = build_archive(output_dir, compression)?;
    let replaced = stage_archive(&temp_path, staged_path)?;
    let (sha256, size) = digest_file(staged_path)?;

    Ok(StagedArchive {
        path: staged_path.to_path_buf(),
        files,
        size,
        sha256,
        replaced,
    })
}
