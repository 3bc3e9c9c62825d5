// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! The configuration file is read once at startup and never written:
//! settings do not persist across launches unless the user edits the file
//! themselves.

use crate::backends::camera::types::DevicePosition;
use crate::pipelines::photo::EncodingQuality;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory photos are saved to; defaults to the photo library
    pub output_dir: Option<PathBuf>,
    /// JPEG quality preset
    pub jpeg_quality: EncodingQuality,
    /// Image file overriding the built-in frame overlay
    pub overlay_path: Option<PathBuf>,
    /// Camera selected at startup when both positions are present
    pub startup_camera: DevicePosition,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            jpeg_quality: EncodingQuality::High,
            overlay_path: None,
            startup_camera: DevicePosition::Back,
        }
    }
}

impl Config {
    /// Default config file location: `~/.config/framecam/config.json`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("framecam").join("config.json"))
    }

    /// Load the user configuration, falling back to defaults
    ///
    /// A missing file is normal; a malformed file is logged and ignored.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
                Self::default()
            }
        }
    }
}
