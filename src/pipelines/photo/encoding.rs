// SPDX-License-Identifier: GPL-3.0-only

//! Async photo encoding
//!
//! This module handles encoding composited images to their output format:
//! - JPEG (with quality control)
//! - PNG (lossless)
//!
//! Encoding and disk writes run on blocking tasks so capture is never
//! blocked.

use crate::constants;
use crate::errors::PhotoError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    #[default]
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }
}

/// Encoding quality settings (JPEG only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression)
    #[default]
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl EncodingQuality {
    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::High => 92,
            EncodingQuality::Maximum => 98,
        }
    }
}

/// Encoded image data ready for saving
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

/// Result of a completed save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Where the photo landed in the library
    pub path: PathBuf,
    /// Encoded size on disk
    pub bytes_written: usize,
}

/// Photo encoder
pub struct PhotoEncoder {
    format: EncodingFormat,
    quality: EncodingQuality,
}

impl PhotoEncoder {
    /// Create a new encoder with JPEG format and high quality
    pub fn new() -> Self {
        Self {
            format: EncodingFormat::Jpeg,
            quality: EncodingQuality::High,
        }
    }

    /// Set encoding format
    pub fn set_format(&mut self, format: EncodingFormat) {
        self.format = format;
    }

    /// Set encoding quality (only affects JPEG)
    pub fn set_quality(&mut self, quality: EncodingQuality) {
        self.quality = quality;
    }

    /// Encode a composited image asynchronously
    pub async fn encode(&self, image: DynamicImage) -> Result<EncodedImage, PhotoError> {
        info!(
            width = image.width(),
            height = image.height(),
            format = ?self.format,
            "Starting encoding"
        );

        let format = self.format;
        let quality = self.quality;

        // Run encoding in background task (CPU-bound)
        tokio::task::spawn_blocking(move || {
            let (width, height) = (image.width(), image.height());
            let data = match format {
                EncodingFormat::Jpeg => Self::encode_jpeg(image, quality)?,
                EncodingFormat::Png => Self::encode_png(image)?,
            };

            debug!(size = data.len(), "Encoding complete");

            Ok(EncodedImage {
                data,
                format,
                width,
                height,
            })
        })
        .await
        .map_err(|e| PhotoError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }

    /// Save an encoded image to disk asynchronously
    ///
    /// Generates a timestamped filename and writes it into the given
    /// directory.
    pub async fn save(
        &self,
        encoded: EncodedImage,
        output_dir: PathBuf,
    ) -> Result<SaveOutcome, PhotoError> {
        let timestamp = chrono::Local::now().format(constants::photo::TIMESTAMP_FORMAT);
        let filename = format!(
            "{}_{}.{}",
            constants::photo::FILE_PREFIX,
            timestamp,
            encoded.format.extension()
        );
        let filepath = output_dir.join(&filename);

        info!(path = %filepath.display(), "Saving photo");

        let bytes_written = encoded.data.len();
        let filepath_clone = filepath.clone();
        tokio::task::spawn_blocking(move || {
            std::fs::write(&filepath_clone, &encoded.data)
                .map_err(|e| PhotoError::SaveFailed(e.to_string()))
        })
        .await
        .map_err(|e| PhotoError::SaveFailed(format!("Save task error: {}", e)))??;

        info!(path = %filepath.display(), "Photo saved successfully");
        Ok(SaveOutcome {
            path: filepath,
            bytes_written,
        })
    }

    /// Encode image as JPEG
    ///
    /// Alpha is flattened away; JPEG carries no transparency.
    fn encode_jpeg(image: DynamicImage, quality: EncodingQuality) -> Result<Vec<u8>, PhotoError> {
        let rgb = image.to_rgb8();
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());

        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| PhotoError::EncodingFailed(e.to_string()))?;

        Ok(buffer)
    }

    /// Encode image as PNG
    fn encode_png(image: DynamicImage) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();

        image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageFormat::Png,
            )
            .map_err(|e| PhotoError::EncodingFailed(e.to_string()))?;

        Ok(buffer)
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extensions() {
        assert_eq!(EncodingFormat::Jpeg.extension(), "jpg");
        assert_eq!(EncodingFormat::Png.extension(), "png");
    }

    #[test]
    fn test_jpeg_quality_values() {
        assert_eq!(EncodingQuality::Low.jpeg_quality(), 60);
        assert_eq!(EncodingQuality::Medium.jpeg_quality(), 80);
        assert_eq!(EncodingQuality::High.jpeg_quality(), 92);
        assert_eq!(EncodingQuality::Maximum.jpeg_quality(), 98);
    }
}
