//! Output formatting and progress indicators
//!
//! This module provides the spinner shown while the build runs, status
//! prefixes, and the global quiet/JSON/verbose output settings.

use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output settings taken from the global CLI flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Print machine-readable JSON instead of text
    pub json: bool,
    /// Verbosity count (-v, -vv)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output settings
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Make these settings visible to [`current`]
    ///
    /// Only the first call has an effect.
    pub fn apply_global(self) {
        let _ = OUTPUT_CONFIG.set(self);
    }

    /// Whether human-readable progress text should be printed
    pub fn shows_text(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing level for the verbosity count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Settings applied by [`OutputConfig::apply_global`], or defaults
pub fn current() -> OutputConfig {
    OUTPUT_CONFIG.get().copied().unwrap_or_default()
}

/// Print a success line unless quiet or JSON output is active
pub fn success(message: &str) {
    if current().shows_text() {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print an informational line unless quiet or JSON output is active
pub fn info(message: &str) {
    if current().shows_text() {
        println!("{} {message}", status::INFO);
    }
}

/// Print an indented detail line unless quiet or JSON output is active
pub fn detail(message: &str) {
    if current().shows_text() {
        println!("  {message}");
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}

/// Create a spinner for operations with unknown duration
///
/// Hidden when quiet or JSON output is active.
pub fn create_spinner(message: &str) -> ProgressBar {
    if !current().shows_text() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Format a byte count for display
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;

    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(OutputConfig::new(false, false, 0).log_level(), "warn");
        assert_eq!(OutputConfig::new(false, false, 1).log_level(), "info");
        assert_eq!(OutputConfig::new(false, false, 3).log_level(), "debug");
    }

    #[test]
    fn test_shows_text() {
        assert!(OutputConfig::new(false, false, 0).shows_text());
        assert!(!OutputConfig::new(true, false, 0).shows_text());
        assert!(!OutputConfig::new(false, true, 0).shows_text());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
