//! Infrastructure layer
//!
//! Handles filesystem access, archives, and the external build process.

pub mod archive;
pub mod build_tool;
pub mod filesystem;
