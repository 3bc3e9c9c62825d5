// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera backend
//!
//! Produces deterministic gradient frames without any hardware. Used by the
//! test suite and as a fallback on machines without a camera stack.

use super::types::{
    BackendError, BackendResult, CameraDevice, CameraFrame, DevicePosition, PixelFormat,
    SessionPreset,
};
use super::{CameraBackend, FrameSource};
use crate::constants::synthetic::{FRAME_HEIGHT, FRAME_WIDTH};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Backend serving frames from a fixed, in-memory device inventory
pub struct SyntheticBackend {
    devices: Vec<CameraDevice>,
}

impl SyntheticBackend {
    /// Backend exposing the given device inventory
    pub fn with_devices(devices: Vec<CameraDevice>) -> Self {
        Self { devices }
    }

    /// Phone-like inventory: one back-facing and one front-facing camera
    pub fn phone_layout() -> Self {
        Self::with_devices(vec![
            CameraDevice {
                name: "Synthetic Rear".to_string(),
                path: "synthetic:0".to_string(),
                position: DevicePosition::Back,
            },
            CameraDevice {
                name: "Synthetic Selfie".to_string(),
                path: "synthetic:1".to_string(),
                position: DevicePosition::Front,
            },
        ])
    }

    /// Backend with no devices at all
    pub fn empty() -> Self {
        Self::with_devices(Vec::new())
    }
}

impl CameraBackend for SyntheticBackend {
    fn enumerate_devices(&self) -> Vec<CameraDevice> {
        self.devices.clone()
    }

    fn open_stream(
        &self,
        device: &CameraDevice,
        _preset: SessionPreset,
    ) -> BackendResult<Box<dyn FrameSource>> {
        if !self.devices.iter().any(|d| d.path == device.path) {
            return Err(BackendError::DeviceNotFound(device.path.clone()));
        }

        info!(device = %device.name, "Opening synthetic frame stream");
        Ok(Box::new(SyntheticSource::new(device.clone())))
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Deterministic gradient frame generator
struct SyntheticSource {
    device: CameraDevice,
    /// Per-device seed so front and back produce distinct imagery
    seed: u8,
    sequence: u64,
}

impl SyntheticSource {
    fn new(device: CameraDevice) -> Self {
        let seed = device
            .path
            .bytes()
            .fold(0u8, |acc, b| acc.wrapping_add(b));
        Self {
            device,
            seed,
            sequence: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn grab(&mut self) -> BackendResult<CameraFrame> {
        self.sequence += 1;

        let (width, height) = (FRAME_WIDTH, FRAME_HEIGHT);
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width) as u8 ^ self.seed;
                let g = (y * 255 / height) as u8;
                let b = ((x + y + self.sequence as u32) & 0xff) as u8;
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }

        debug!(
            device = %self.device.name,
            sequence = self.sequence,
            "Generated synthetic frame"
        );

        Ok(CameraFrame {
            width,
            height,
            stride: width * 4,
            data: Arc::from(data),
            format: PixelFormat::Rgba,
            captured_at: Instant::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_deterministic_per_device() {
        let backend = SyntheticBackend::phone_layout();
        let device = backend.enumerate_devices().remove(0);

        let mut a = backend.open_stream(&device, SessionPreset::Photo).unwrap();
        let mut b = backend.open_stream(&device, SessionPreset::Photo).unwrap();

        let frame_a = a.grab().unwrap();
        let frame_b = b.grab().unwrap();
        assert_eq!(frame_a.data.as_ref(), frame_b.data.as_ref());
    }

    #[test]
    fn front_and_back_produce_distinct_imagery() {
        let backend = SyntheticBackend::phone_layout();
        let devices = backend.enumerate_devices();

        let mut back = backend.open_stream(&devices[0], SessionPreset::Photo).unwrap();
        let mut front = backend.open_stream(&devices[1], SessionPreset::Photo).unwrap();

        assert_ne!(
            back.grab().unwrap().data.as_ref(),
            front.grab().unwrap().data.as_ref()
        );
    }

    #[test]
    fn unknown_device_is_rejected() {
        let backend = SyntheticBackend::empty();
        let ghost = CameraDevice {
            name: "Ghost".to_string(),
            path: "synthetic:99".to_string(),
            position: DevicePosition::Back,
        };

        assert!(matches!(
            backend.open_stream(&ghost, SessionPreset::Photo),
            Err(BackendError::DeviceNotFound(_))
        ));
    }
}
