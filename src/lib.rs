//! Plugstage - plugin release staging
//!
//! Builds a plugin with an external build tool, reads the version from the
//! manifest the build emits, packages the build output into a zip, stages it
//! for distribution and refreshes the matching plugin master index entry.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Config, manifest, index and release pipeline logic
//! - [`infra`] - Filesystem, zip archives and the build process
//! - [`config`] - Constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
