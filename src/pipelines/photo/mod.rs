// SPDX-License-Identifier: GPL-3.0-only

//! Async photo pipeline
//!
//! This pipeline implements the single-shot capture workflow:
//!
//! ```text
//! Camera Backend → Capture → Compositing → Encoding → Disk I/O
//!       ↓
//! Preview continues uninterrupted
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Capture**: grab one frame from the running session
//! 2. **Compositing**: stretch the decorative frame over the photo
//! 3. **Encoding**: convert to JPEG/PNG
//! 4. **Disk I/O**: save under a timestamped name

pub mod capture;
pub mod compositor;
pub mod encoding;

pub use capture::{CapturedPhoto, PhotoCapture};
pub use encoding::{EncodingFormat, EncodingQuality, PhotoEncoder, SaveOutcome};

use crate::errors::PhotoError;
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

/// Complete photo pipeline
///
/// Orchestrates the composite → encode → save workflow for captured photos.
pub struct PhotoPipeline {
    encoder: PhotoEncoder,
    overlay: Option<Arc<DynamicImage>>,
}

impl PhotoPipeline {
    /// Pipeline with JPEG output and no overlay
    pub fn new() -> Self {
        Self {
            encoder: PhotoEncoder::new(),
            overlay: None,
        }
    }

    /// Set the decorative frame composited onto every photo
    pub fn set_overlay(&mut self, overlay: Arc<DynamicImage>) {
        self.overlay = Some(overlay);
    }

    /// Remove the overlay; photos pass through unchanged
    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    /// Update encoding format
    pub fn set_format(&mut self, format: EncodingFormat) {
        self.encoder.set_format(format);
    }

    /// Update encoding quality
    pub fn set_quality(&mut self, quality: EncodingQuality) {
        self.encoder.set_quality(quality);
    }

    /// Composite, encode, and save one captured photo
    ///
    /// # Returns
    /// * `Ok(SaveOutcome)` - where the photo landed and its size
    /// * `Err(PhotoError)` - the stage that failed
    pub async fn process_and_save(
        &self,
        photo: CapturedPhoto,
        output_dir: PathBuf,
    ) -> Result<SaveOutcome, PhotoError> {
        let overlay = self.overlay.clone();

        // Stage 1: composite (CPU-bound)
        let composited = tokio::task::spawn_blocking(move || {
            let base = compositor::frame_to_image(&photo.frame)?;
            Ok::<_, PhotoError>(compositor::composite(&base, overlay.as_deref()))
        })
        .await
        .map_err(|e| PhotoError::CaptureFailed(format!("Compositing task error: {}", e)))??;

        // Stage 2: encode (CPU-bound), Stage 3: save (I/O-bound)
        let encoded = self.encoder.encode(composited).await?;
        self.encoder.save(encoded, output_dir).await
    }
}

impl Default for PhotoPipeline {
    fn default() -> Self {
        Self::new()
    }
}
