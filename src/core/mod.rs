//! Core release logic
//!
//! # Submodules
//!
//! - [`project`] - Project config (plugstage.toml) parsing and validation
//! - [`manifest`] - Build manifest reading and patching
//! - [`plugin_index`] - Plugin master index updates
//! - [`json`] - Sorted, 4-space JSON output
//! - [`release`] - Release plan and pipeline
//! - [`init`] - Project config scaffolding
//! - [`check`] - Release plan validation

pub mod check;
pub mod init;
pub mod json;
pub mod manifest;
pub mod plugin_index;
pub mod project;
pub mod release;
