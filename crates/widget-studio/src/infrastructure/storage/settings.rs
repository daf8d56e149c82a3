//! TOML-based settings for the studio itself.
//!
//! These are preferences for the editor, not the widget config being edited.
//! They live in the platform-appropriate settings file:
//! - Windows:  `%APPDATA%\WidgetStudio\settings.toml`
//! - Linux:    `~/.config/widget-studio/settings.toml`
//! - macOS:    `~/Library/Application Support/WidgetStudio/settings.toml`
//!
//! ```toml
//! [general]
//! log_level = "info"
//! default_config = "config.json"
//!
//! [images]
//! max_bytes = 2097152
//! ```
//!
//! Every field has a serde default, so a missing file, an empty file, or a
//! file from an older version all load cleanly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Top-level studio settings stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StudioSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub images: ImageSettings,
}

/// General editor behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Config file edited when `--config` is not given.
    #[serde(default = "default_config_path")]
    pub default_config: PathBuf,
}

/// Limits applied when attaching or embedding images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSettings {
    /// Largest image file, in bytes, that may be embedded as a data URI.
    #[serde(default = "default_max_image_bytes")]
    pub max_bytes: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_config_path() -> PathBuf {
    PathBuf::from("config.json")
}
fn default_max_image_bytes() -> u64 {
    2 * 1024 * 1024
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_config: default_config_path(),
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_bytes: default_max_image_bytes(),
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Resolves the full path to the default settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    platform_config_dir()
        .map(|dir| dir.join("settings.toml"))
        .ok_or(SettingsError::NoPlatformConfigDir)
}

/// Loads settings from `path`, or from the platform default location when
/// `path` is `None`.
///
/// A missing file yields [`StudioSettings::default`].  So does an undeterminable
/// platform directory, since there is then nothing to read.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: Option<&Path>) -> Result<StudioSettings, SettingsError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match settings_file_path() {
            Ok(p) => p,
            Err(SettingsError::NoPlatformConfigDir) => return Ok(StudioSettings::default()),
            Err(e) => return Err(e),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StudioSettings::default()),
        Err(e) => Err(SettingsError::Io { path, source: e }),
    }
}

/// Persists `settings` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system failures or
/// [`SettingsError::Serialize`] if serialization fails.
pub fn save_settings(settings: &StudioSettings, path: &Path) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform settings directory for the studio.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("WidgetStudio"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("widget-studio"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("WidgetStudio")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
