//! Constants used throughout the application
//!
//! This module centralizes file names, defaults and user-facing messages.

// Files and directories
pub const APP_DIR_NAME: &str = "tripclock";
pub const LOCAL_CONFIG_FILE: &str = "tripclock.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "tripclock.log";

// Defaults
/// Zone of the Capital Bikeshare docks the sample trips come from
pub const DEFAULT_ZONE: &str = "America/New_York";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_RECORD_FAILED: &str = "❌ Trip could not be resolved";
pub const ERROR_GAP_FAILED: &str = "❌ Gap could not be resolved";
pub const ERROR_STRICT_ABORT: &str = "❌ Aborting on first invalid trip (strict mode)";
pub const NO_AMBIGUOUS_ENDPOINTS: &str = "No trip endpoints fall in a repeated hour";
