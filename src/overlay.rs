// SPDX-License-Identifier: GPL-3.0-only

//! Decorative frame overlay asset
//!
//! One fixed frame image ships embedded in the binary; the configuration
//! may point at an image on disk instead. The loaded overlay is shared
//! read-only across all composites.

use crate::config::Config;
use crate::errors::AppError;
use image::DynamicImage;
use rust_embed::RustEmbed;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.png"]
struct Assets;

/// The built-in decorative frame
pub const BUILTIN_FRAME: &str = "frame-classic.png";

/// Load the built-in frame overlay
pub fn load_builtin() -> Result<Arc<DynamicImage>, AppError> {
    let file = Assets::get(BUILTIN_FRAME)
        .ok_or_else(|| AppError::Other(format!("Missing embedded asset: {}", BUILTIN_FRAME)))?;

    let image = image::load_from_memory(file.data.as_ref())
        .map_err(|e| AppError::Other(format!("Failed to decode embedded frame: {}", e)))?;

    debug!(
        asset = BUILTIN_FRAME,
        width = image.width(),
        height = image.height(),
        "Loaded built-in frame"
    );
    Ok(Arc::new(image))
}

/// Load a frame overlay from disk
pub fn load_from_path(path: &Path) -> Result<Arc<DynamicImage>, AppError> {
    let image = image::open(path).map_err(|e| {
        AppError::Config(format!(
            "Failed to load overlay {}: {}",
            path.display(),
            e
        ))
    })?;

    info!(path = %path.display(), "Loaded frame overlay from file");
    Ok(Arc::new(image))
}

/// Resolve the overlay for this run: config override, else the built-in
pub fn load(config: &Config) -> Result<Arc<DynamicImage>, AppError> {
    match &config.overlay_path {
        Some(path) => load_from_path(path),
        None => load_builtin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_frame_decodes() {
        let overlay = load_builtin().expect("embedded frame present");
        assert!(overlay.width() > 0);
        assert!(overlay.height() > 0);
    }

    #[test]
    fn missing_override_file_is_an_error() {
        assert!(load_from_path(Path::new("/nonexistent/frame.png")).is_err());
    }
}
