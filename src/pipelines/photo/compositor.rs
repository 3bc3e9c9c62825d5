// SPDX-License-Identifier: GPL-3.0-only

//! Frame overlay compositing
//!
//! The decorative frame is stretched over the captured photo and the two
//! are flattened into a single image with the photo's dimensions.

use crate::backends::camera::types::{CameraFrame, PixelFormat};
use crate::errors::PhotoError;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage, imageops};

/// Composite `overlay` over `base`
///
/// The overlay is stretched to exactly `base`'s pixel dimensions and
/// alpha-blended on top; mismatched aspect ratios are not an error. With no
/// overlay the photo passes through pixel-identical. The drawing surface is
/// scoped to this call and released with it.
pub fn composite(base: &DynamicImage, overlay: Option<&DynamicImage>) -> DynamicImage {
    let Some(overlay) = overlay else {
        return base.clone();
    };

    let (width, height) = (base.width(), base.height());

    let mut canvas: RgbaImage = base.to_rgba8();
    let stretched = overlay
        .resize_exact(width, height, imageops::FilterType::Triangle)
        .to_rgba8();
    imageops::overlay(&mut canvas, &stretched, 0, 0);

    DynamicImage::ImageRgba8(canvas)
}

/// Decode a camera frame into an image for compositing
pub fn frame_to_image(frame: &CameraFrame) -> Result<DynamicImage, PhotoError> {
    let (width, height) = (frame.width, frame.height);
    let expected = frame.expected_len();
    if frame.data.len() < expected {
        return Err(PhotoError::CaptureFailed(format!(
            "Frame data too small: expected {}, got {}",
            expected,
            frame.data.len()
        )));
    }

    let pixels = frame.data[..expected].to_vec();
    let image = match frame.format {
        PixelFormat::Rgba => {
            RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
        }
        PixelFormat::Rgb24 => {
            RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
        }
        PixelFormat::Gray8 => {
            GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8)
        }
    };

    image.ok_or_else(|| PhotoError::CaptureFailed("Failed to build image from frame data".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn frame_to_image_keeps_dimensions() {
        let frame = CameraFrame {
            width: 4,
            height: 2,
            stride: 12,
            data: Arc::from(vec![128u8; 4 * 2 * 3]),
            format: PixelFormat::Rgb24,
            captured_at: Instant::now(),
        };

        let image = frame_to_image(&frame).unwrap();
        assert_eq!((image.width(), image.height()), (4, 2));
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let frame = CameraFrame {
            width: 4,
            height: 4,
            stride: 16,
            data: Arc::from(vec![0u8; 7]),
            format: PixelFormat::Rgba,
            captured_at: Instant::now(),
        };

        assert!(matches!(
            frame_to_image(&frame),
            Err(PhotoError::CaptureFailed(_))
        ));
    }
}
