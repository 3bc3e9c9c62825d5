// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │    CLI / Library    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraSessionManager│  ← Discovery, session lifecycle, switching
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← Common interface
//! └──────────┬──────────┘
//!            │
//!      ┌─────┴─────┐
//!      ▼           ▼
//! ┌─────────┐ ┌──────────┐
//! │Synthetic│ │ Hardware │  ← Concrete implementations
//! └─────────┘ └──────────┘
//! ```

pub mod manager;
pub mod synthetic;
pub mod types;

#[cfg(feature = "camera")]
pub mod hardware;

pub use manager::{CameraSessionManager, SessionState};
pub use types::*;

use std::sync::Arc;

/// A live frame stream from an opened camera device
pub trait FrameSource: Send {
    /// Pull the next frame from the device
    fn grab(&mut self) -> BackendResult<CameraFrame>;
}

/// Camera backend trait
///
/// All camera backends must provide:
/// - Device enumeration with position classification
/// - Opening a frame stream bound to a device at a session preset
pub trait CameraBackend: Send + Sync {
    /// Enumerate available cameras on this backend
    fn enumerate_devices(&self) -> Vec<CameraDevice>;

    /// Open a frame stream bound to the given device
    fn open_stream(
        &self,
        device: &CameraDevice,
        preset: SessionPreset,
    ) -> BackendResult<Box<dyn FrameSource>>;

    /// Check if this backend is available on the current system
    fn is_available(&self) -> bool;
}

/// Get the default backend for this system
///
/// Prefers real hardware when the `camera` feature is enabled and a device
/// is present, otherwise falls back to the synthetic backend.
pub fn default_backend() -> Arc<dyn CameraBackend> {
    #[cfg(feature = "camera")]
    {
        let backend = hardware::HardwareBackend::new();
        if backend.is_available() {
            return Arc::new(backend);
        }
        tracing::warn!("No hardware camera available, falling back to synthetic backend");
    }

    Arc::new(synthetic::SyntheticBackend::phone_layout())
}
