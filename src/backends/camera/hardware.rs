// SPDX-License-Identifier: GPL-3.0-only

//! Hardware camera backend (nokhwa)
//!
//! Only compiled with the `camera` feature. UVC/V4L2 do not report a
//! mounting position, so devices are classified by name with the first
//! enumerated device treated as the back camera.

use super::types::{
    BackendError, BackendResult, CameraDevice, CameraFrame, DevicePosition, PixelFormat,
    SessionPreset,
};
use super::{CameraBackend, FrameSource};
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct HardwareBackend;

impl HardwareBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HardwareBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_position(name: &str, index: usize) -> DevicePosition {
    let lower = name.to_lowercase();
    if lower.contains("front") || lower.contains("user") || lower.contains("facetime") {
        DevicePosition::Front
    } else if index == 0 {
        DevicePosition::Back
    } else {
        DevicePosition::External
    }
}

impl CameraBackend for HardwareBackend {
    fn enumerate_devices(&self) -> Vec<CameraDevice> {
        let devices = match nokhwa::query(ApiBackend::Auto) {
            Ok(devices) => devices,
            Err(e) => {
                warn!(error = %e, "Camera enumeration failed");
                return Vec::new();
            }
        };

        devices
            .into_iter()
            .enumerate()
            .map(|(index, info)| CameraDevice {
                name: info.human_name(),
                path: info.index().to_string(),
                position: classify_position(&info.human_name(), index),
            })
            .collect()
    }

    fn open_stream(
        &self,
        device: &CameraDevice,
        _preset: SessionPreset,
    ) -> BackendResult<Box<dyn FrameSource>> {
        let index = device
            .path
            .parse::<u32>()
            .map(CameraIndex::Index)
            .unwrap_or_else(|_| CameraIndex::String(device.path.clone()));

        // Photo preset: highest available stills resolution
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera =
            Camera::new(index, requested).map_err(|e| BackendError::OpenFailed(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| BackendError::OpenFailed(e.to_string()))?;

        info!(device = %device.name, "Opened hardware frame stream");
        Ok(Box::new(HardwareSource { camera }))
    }

    fn is_available(&self) -> bool {
        nokhwa::query(ApiBackend::Auto)
            .map(|devices| !devices.is_empty())
            .unwrap_or(false)
    }
}

struct HardwareSource {
    camera: Camera,
}

impl FrameSource for HardwareSource {
    fn grab(&mut self) -> BackendResult<CameraFrame> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| BackendError::StreamError(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| BackendError::StreamError(e.to_string()))?;
        let (width, height) = decoded.dimensions();

        Ok(CameraFrame {
            width,
            height,
            stride: width * 3,
            data: Arc::from(decoded.into_raw()),
            format: PixelFormat::Rgb24,
            captured_at: Instant::now(),
        })
    }
}

impl Drop for HardwareSource {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            warn!(error = %e, "Failed to stop camera stream");
        }
    }
}
