// SPDX-License-Identifier: MPL-2.0
//! Service configuration, loaded from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[upload]` - Upload size limit and accepted content types
//! - `[extraction]` - Accuracy reported for EXIF fixes
//! - `[estimator]` - Placeholder estimator latency
//! - `[scratch]` - Directory used to stage uploads
//! - `[diagnostics]` - Event buffer capacity
//! - `[auth]` - Digests of accepted access tokens
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration.
//!
//! # Path Resolution
//!
//! 1. `load_from_path()`/`save_to_path()` with an explicit path
//! 2. `GEOLENS_CONFIG_DIR` environment variable
//! 3. Platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use geolens::config;
//!
//! // Invalid files fall back to defaults with a warning.
//! let (mut config, warning) = config::load();
//! if let Some(message) = warning {
//!     eprintln!("{message}");
//! }
//!
//! config.estimator.delay_ms = 0;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::error::ALLOWED_CONTENT_TYPES;
use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Upload validation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum accepted upload size in bytes. Values above
    /// [`MAX_UPLOAD_BYTES`] are clamped down.
    pub max_bytes: u64,

    /// Accepted declared content types. Entries outside the built-in
    /// allow-list are ignored.
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_types: ALLOWED_CONTENT_TYPES.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl UploadConfig {
    /// Effective size limit, never above the hard limit.
    #[must_use]
    pub fn effective_max_bytes(&self) -> u64 {
        self.max_bytes.min(MAX_UPLOAD_BYTES)
    }

    /// Effective allow-list: configured entries that are also built-in types.
    #[must_use]
    pub fn effective_allowed_types(&self) -> Vec<String> {
        self.allowed_types
            .iter()
            .filter(|t| ALLOWED_CONTENT_TYPES.contains(&t.as_str()))
            .cloned()
            .collect()
    }
}

/// GPS extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Accuracy in meters attached to EXIF fixes.
    pub exif_accuracy_meters: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            exif_accuracy_meters: DEFAULT_EXIF_ACCURACY_METERS,
        }
    }
}

/// Placeholder estimator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Simulated inference delay in milliseconds.
    pub delay_ms: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_ESTIMATOR_DELAY_MS,
        }
    }
}

impl EstimatorConfig {
    #[must_use]
    pub fn effective_delay_ms(&self) -> u64 {
        self.delay_ms.min(MAX_ESTIMATOR_DELAY_MS)
    }
}

/// Scratch staging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScratchConfig {
    /// Directory for staged uploads. `None` uses the system temp directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Number of events kept in memory.
    pub buffer_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
        }
    }
}

impl DiagnosticsConfig {
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        BufferCapacity::new(self.buffer_capacity)
    }
}

/// Access token settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Lowercase hex BLAKE3 digests of accepted tokens.
    pub token_hashes: Vec<String>,
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub upload: UploadConfig,
    pub extraction: ExtractionConfig,
    pub estimator: EstimatorConfig,
    pub scratch: ScratchConfig,
    pub diagnostics: DiagnosticsConfig,
    pub auth: AuthConfig,
}

// =============================================================================
// Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default location.
///
/// Returns defaults plus a warning message when the file exists but cannot
/// be read or parsed.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "Ignoring {}: {}; using defaults",
                            path.display(),
                            err
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
