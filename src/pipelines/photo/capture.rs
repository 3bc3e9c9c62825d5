// SPDX-License-Identifier: GPL-3.0-only

//! Single-shot photo capture
//!
//! A capture request resolves exactly once, with either the captured photo
//! or the failure reason, delivered over a oneshot channel.

use crate::backends::camera::CameraSessionManager;
use crate::backends::camera::types::CameraFrame;
use crate::constants;
use crate::errors::PhotoError;
use crate::flash::{FlashController, FlashMode};
use futures::channel::oneshot;
use tracing::{debug, info, warn};

/// The product of one capture request
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub frame: CameraFrame,
    /// Whether the flash fired for this shot
    pub flash_fired: bool,
}

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Issue a capture request against the running session
    ///
    /// Returns a receiver that resolves exactly once. Dropping the receiver
    /// abandons the result without cancelling the capture.
    pub fn request(
        manager: &CameraSessionManager,
        flash: FlashMode,
    ) -> oneshot::Receiver<Result<CapturedPhoto, PhotoError>> {
        let (tx, rx) = oneshot::channel();
        let manager = manager.clone();

        tokio::spawn(async move {
            let result = Self::capture(&manager, flash).await;
            if tx.send(result).is_err() {
                debug!("Capture result dropped by caller");
            }
        });

        rx
    }

    /// Grab one frame, firing the flash when the mode calls for it
    ///
    /// Auto mode probes the scene first and re-grabs under flash
    /// illumination only when the probe frame is dark.
    async fn capture(
        manager: &CameraSessionManager,
        flash: FlashMode,
    ) -> Result<CapturedPhoto, PhotoError> {
        info!(?flash, "Capturing photo");

        let probe = manager
            .capture_frame()
            .map_err(|e| PhotoError::CaptureFailed(e.to_string()))?;

        if !flash.should_fire(probe.mean_luma()) {
            return Ok(CapturedPhoto {
                frame: probe,
                flash_fired: false,
            });
        }

        let controller = FlashController::discover();
        if !controller.is_present() {
            debug!("No flash LED available, keeping probe frame");
            return Ok(CapturedPhoto {
                frame: probe,
                flash_fired: false,
            });
        }

        // Re-grab under flash illumination
        controller.torch_on();
        tokio::time::sleep(constants::flash::FIRE_SETTLE).await;
        let lit = manager.capture_frame();
        controller.torch_off();

        match lit {
            Ok(frame) => Ok(CapturedPhoto {
                frame,
                flash_fired: true,
            }),
            Err(e) => {
                warn!(error = %e, "Flash-lit grab failed, keeping probe frame");
                Ok(CapturedPhoto {
                    frame: probe,
                    flash_fired: false,
                })
            }
        }
    }
}
