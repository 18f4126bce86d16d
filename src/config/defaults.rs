//! Default configuration values

/// Project config file name
pub const CONFIG_FILE: &str = "plugstage.toml";

/// Default build tool (looked up on PATH)
pub const DEFAULT_BUILD_TOOL: &str = "msbuild";

/// Default build targets, passed as `-t:Clean,Restore,Build`
pub const DEFAULT_TARGETS: &[&str] = &["Clean", "Restore", "Build"];

/// Default build configuration
pub const DEFAULT_CONFIGURATION: &str = "Release";

/// Default build output directory, relative to the project directory
pub const DEFAULT_OUTPUT_DIR: &str = "bin/x64/Release";

/// Name of the scratch archive written inside the output directory
pub const TEMP_ARCHIVE_NAME: &str = "temp.zip";

/// Indentation used when rewriting JSON documents
pub const JSON_INDENT: &[u8] = b"    ";

/// Manifest field holding the build version
pub const FIELD_ASSEMBLY_VERSION: &str = "AssemblyVersion";

/// Manifest field holding the plugin identifier
pub const FIELD_INTERNAL_NAME: &str = "InternalName";

/// Index field mirroring the version for testing builds
pub const FIELD_TESTING_ASSEMBLY_VERSION: &str = "TestingAssemblyVersion";

/// Index field holding the last update time in epoch seconds
pub const FIELD_LAST_UPDATED: &str = "LastUpdated";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
