// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Classification of a camera relative to the device body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePosition {
    /// Main camera, faces away from the user
    #[default]
    Back,
    /// Selfie camera, faces the user
    Front,
    /// USB or otherwise externally attached camera
    External,
}

impl std::fmt::Display for DevicePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DevicePosition::Back => write!(f, "back"),
            DevicePosition::Front => write!(f, "front"),
            DevicePosition::External => write!(f, "external"),
        }
    }
}

/// Represents a camera device
///
/// Immutable once discovered; the session manager retains at most one
/// back-facing and one front-facing reference for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// Backend-specific identifier (index or node path)
    pub path: String,
    pub position: DevicePosition,
}

/// Quality preset a capture session is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPreset {
    /// Full-resolution stills
    #[default]
    Photo,
}

/// Pixel format for camera frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// RGBA - 32-bit with alpha (4 bytes per pixel), the canonical format
    Rgba,
    /// RGB24 - 24-bit RGB without alpha (3 bytes per pixel)
    Rgb24,
    /// Gray8 - 8-bit grayscale, used by monochrome and IR cameras
    Gray8,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// A single frame from the camera
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Packed pixel data in `format`
    pub data: Arc<[u8]>,
    pub format: PixelFormat,
    /// Row stride in bytes
    pub stride: u32,
    /// Timestamp when the frame was captured (for latency diagnostics)
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Expected packed data length for the frame geometry
    pub fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * self.format.bytes_per_pixel()
    }

    /// Mean luma (0-255) over the frame, used by the auto flash decision
    pub fn mean_luma(&self) -> u8 {
        let len = self.expected_len().min(self.data.len());
        if len == 0 {
            return 0;
        }

        let data = &self.data[..len];
        let (sum, count): (u64, u64) = match self.format {
            PixelFormat::Rgba => data
                .chunks_exact(4)
                .map(|px| luma(px[0], px[1], px[2]))
                .fold((0, 0), |(s, c), l| (s + l as u64, c + 1)),
            PixelFormat::Rgb24 => data
                .chunks_exact(3)
                .map(|px| luma(px[0], px[1], px[2]))
                .fold((0, 0), |(s, c), l| (s + l as u64, c + 1)),
            PixelFormat::Gray8 => data
                .iter()
                .fold((0, 0), |(s, c), &l| (s + l as u64, c + 1)),
        };

        if count == 0 { 0 } else { (sum / count) as u8 }
    }
}

/// Rec. 601 luma approximation
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Camera device not found
    DeviceNotFound(String),
    /// Failed to open the device
    OpenFailed(String),
    /// Frame delivery failed mid-stream
    StreamError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::OpenFailed(msg) => write!(f, "Failed to open device: {}", msg),
            BackendError::StreamError(msg) => write!(f, "Stream error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(format: PixelFormat, data: Vec<u8>, width: u32, height: u32) -> CameraFrame {
        CameraFrame {
            width,
            height,
            stride: width * format.bytes_per_pixel() as u32,
            data: Arc::from(data),
            format,
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn mean_luma_of_black_and_white_frames() {
        let black = frame(PixelFormat::Rgba, vec![0, 0, 0, 255, 0, 0, 0, 255], 2, 1);
        assert_eq!(black.mean_luma(), 0);

        let white = frame(PixelFormat::Gray8, vec![255; 4], 2, 2);
        assert_eq!(white.mean_luma(), 255);
    }

    #[test]
    fn mean_luma_ignores_alpha() {
        let opaque = frame(PixelFormat::Rgba, vec![100, 100, 100, 255], 1, 1);
        let transparent = frame(PixelFormat::Rgba, vec![100, 100, 100, 0], 1, 1);
        assert_eq!(opaque.mean_luma(), transparent.mean_luma());
    }

    #[test]
    fn mean_luma_of_empty_frame_is_zero() {
        let empty = frame(PixelFormat::Rgb24, Vec::new(), 0, 0);
        assert_eq!(empty.mean_luma(), 0);
    }
}
