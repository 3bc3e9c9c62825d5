// SPDX-License-Identifier: GPL-3.0-only

//! Photo library storage

use crate::constants::file_formats;
use crate::errors::AppError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory photos are saved to: `~/Pictures/framecam`
///
/// Falls back to the current directory when the platform exposes no
/// pictures directory.
pub fn photo_library_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("framecam")
}

/// Create the photo library directory if needed
pub fn ensure_library_dir(dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(dir).map_err(|e| AppError::Storage(e.to_string()))
}

/// Find the most recently modified photo in the library
///
/// Scans for JPEG and PNG files and returns the newest one, or `None` when
/// the library is empty or unreadable.
pub async fn latest_photo(library_dir: PathBuf) -> Option<PathBuf> {
    tokio::task::spawn_blocking(move || {
        let entries = std::fs::read_dir(&library_dir).ok()?;

        let mut photos: Vec<_> = entries
            .flatten()
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| file_formats::is_image_extension(ext))
            })
            .collect();

        if photos.is_empty() {
            return None;
        }

        // Sort by modification time (newest first)
        photos.sort_by_key(|entry| {
            entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .map(std::cmp::Reverse)
        });

        let latest = photos.first()?.path();
        debug!(path = ?latest, "Found latest photo");
        Some(latest)
    })
    .await
    .ok()?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn latest_photo_ignores_non_image_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a photo").unwrap();
        std::fs::write(dir.path().join("IMG_20260101_120000.jpg"), b"jpeg").unwrap();

        let latest = latest_photo(dir.path().to_path_buf()).await;
        assert_eq!(
            latest,
            Some(dir.path().join("IMG_20260101_120000.jpg"))
        );
    }

    #[tokio::test]
    async fn empty_library_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_photo(dir.path().to_path_buf()).await, None);
    }

    #[tokio::test]
    async fn missing_library_yields_none() {
        assert_eq!(
            latest_photo(PathBuf::from("/nonexistent/pictures")).await,
            None
        );
    }
}
