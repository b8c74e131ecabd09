// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - `--config-dir` on the command line, or a test path
//! 2. **Environment variable** - `GEOLENS_CONFIG_DIR` (if set and non-empty)
//! 3. **Platform default** - via `dirs`:
//!    - Linux: `~/.config/geolens/`
//!    - macOS: `~/Library/Application Support/geolens/`
//!    - Windows: `C:\Users\<User>\AppData\Roaming\geolens\`

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "geolens";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "GEOLENS_CONFIG_DIR";

/// Returns the config directory, honoring an explicit override first.
///
/// Returns `None` only when no override is given, the env var is unset and
/// the platform has no config directory.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the config directory without an explicit override.
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_override(None)
}
